/*!

Classification of free-text vote comments.

A spreadsheet of comments usually has one column in which respondents state
their vote, under a header that changes from one survey to the next. This
crate finds that column by name, assigns one of three labels to every row,
and counts the labels.

```
use vote_classifier::*;

let table = Table::new(
    vec!["ID".to_string(), "Comentario de Votación".to_string()],
    vec![vec![Some("1".to_string()), Some("Voté por Noboa".to_string())]],
);
let column = locate_vote_column(&table.columns);
let res = classify_and_count(&table, column.as_ref())?;
assert_eq!(res.column.name, "comentario de votación");
assert_eq!(res.counts.get(Label::Noboa), 1);
# Ok::<(), ClassifyError>(())
```

*/
pub mod builder;
mod config;
pub mod manual;
pub mod sample;

use log::{debug, info};

pub use crate::config::*;

/// Substrings that identify the vote column, in priority order.
pub const CANDIDATE_TOKENS: [&str; 5] = ["voto", "elección", "elecciones", "votación", "opción"];

/// The name under which the located column is exposed downstream.
pub const CANONICAL_COLUMN: &str = "Voto";

/// The share of null votes (in percent) above which it is considered high.
pub const NULL_SHARE_THRESHOLD_PERCENT: f64 = 20.0;

/// Trims and lower-cases a header name.
pub fn clean_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Finds the column that most plausibly holds the votes.
///
/// Columns are scanned in their original order and the first one whose
/// cleaned name contains any of the [CANDIDATE_TOKENS] wins. The order of the
/// columns takes precedence over the order of the tokens.
pub fn locate_vote_column(columns: &[String]) -> Option<VoteColumn> {
    for (index, col) in columns.iter().enumerate() {
        let name = clean_column_name(col);
        if let Some(token) = CANDIDATE_TOKENS.iter().find(|t| name.contains(*t)) {
            debug!(
                "locate_vote_column: column {} {:?} matches token {:?}",
                index, name, token
            );
            return Some(VoteColumn { index, name });
        }
    }
    debug!("locate_vote_column: no match in {:?}", columns);
    None
}

/// The text content of a cell: trimmed, and empty when missing.
pub fn normalize_value(cell: Option<&str>) -> String {
    cell.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Assigns a label to a normalized value.
///
/// The tests are case-sensitive and `Noboa` is checked first, so a value that
/// mentions both candidates counts for `Voto Noboa`.
pub fn classify_text(value: &str) -> Label {
    if value.contains("Noboa") {
        Label::Noboa
    } else if value.contains("Luisa") {
        Label::Luisa
    } else {
        Label::Nulo
    }
}

/// Classifies every row of the table using the given vote column, and counts the labels.
///
/// Arguments:
/// * `table` the rows to classify
/// * `column` the result of [locate_vote_column]. If no column was found, the
/// classification fails with [ClassifyError::MissingColumn].
pub fn classify_and_count(
    table: &Table,
    column: Option<&VoteColumn>,
) -> Result<Classification, ClassifyError> {
    let column = match column {
        Some(c) => c.clone(),
        None => {
            return Err(ClassifyError::MissingColumn {
                columns: table.columns.iter().map(|c| clean_column_name(c)).collect(),
            });
        }
    };
    info!(
        "Classifying {} rows using column {:?} as {:?}",
        table.num_rows(),
        column.name,
        CANONICAL_COLUMN
    );

    let mut rows: Vec<ClassifiedRow> = table
        .column_values(column.index)
        .enumerate()
        .map(|(index, cell)| {
            let vote = normalize_value(cell);
            let label = classify_text(&vote);
            debug!("classify_and_count: row {} {:?} -> {}", index, vote, label);
            ClassifiedRow { index, vote, label }
        })
        .collect();
    // sort_by_key is stable: rows with the same label keep their input order.
    rows.sort_by_key(|r| r.label);

    let counts = CountMapping::from_labels(rows.iter().map(|r| &r.label));
    info!("Counts: {:?}", counts);
    Ok(Classification {
        column,
        rows,
        counts,
    })
}

/// Locates the vote column and classifies the table in one step.
pub fn classify_table(table: &Table) -> Result<Classification, ClassifyError> {
    let column = locate_vote_column(&table.columns);
    classify_and_count(table, column.as_ref())
}

/// Classifies the table against a column with a fixed, exact name.
///
/// This skips the fuzzy search: the header must match `name` exactly.
pub fn classify_fixed_column(table: &Table, name: &str) -> Result<Classification, ClassifyError> {
    let column = table.column_index(name).map(|index| VoteColumn {
        index,
        name: clean_column_name(name),
    });
    classify_and_count(table, column.as_ref())
}

/// Computes the share of `Voto Nulo` among all the counted rows.
pub fn assess_nulls(counts: &CountMapping) -> NullAssessment {
    let nulls = counts.get(Label::Nulo);
    let total = counts.total();
    let percent = if total > 0 {
        (nulls as f64 / total as f64) * 100.0
    } else {
        0.0
    };
    let level = if percent > NULL_SHARE_THRESHOLD_PERCENT {
        NullLevel::High
    } else {
        NullLevel::Low
    };
    NullAssessment {
        nulls,
        total,
        percent,
        level,
    }
}
