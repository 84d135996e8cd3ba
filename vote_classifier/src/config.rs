// ********* Input data structures ***********

use std::cmp::Ordering;
use std::error::Error;
use std::fmt::Display;

/// A table as read from a spreadsheet: the header and the rows below it.
///
/// Cells are kept as text. A `None` cell is a missing value. Rows may be
/// shorter than the header, in which case the trailing cells are missing.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Table {
        Table { columns, rows }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The position of the column with exactly this name, if any.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The cell at the given position. Out of range cells are missing.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// All the cells of one column, in row order.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |r| r.get(col).and_then(|c| c.as_deref()))
    }
}

/// The column that was picked as holding the votes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteColumn {
    /// Position in the header.
    pub index: usize,
    /// The cleaned (trimmed, lower-cased) name.
    pub name: String,
}

// ******** Output data structures *********

/// The three possible outcomes for a row.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Label {
    Noboa,
    Luisa,
    Nulo,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Noboa, Label::Luisa, Label::Nulo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Noboa => "Voto Noboa",
            Label::Luisa => "Voto Luisa",
            Label::Nulo => "Voto Nulo",
        }
    }

    pub fn from_label(s: &str) -> Option<Label> {
        Label::ALL.iter().copied().find(|l| l.as_str() == s)
    }
}

// Labels sort by their textual value, not by declaration order.
impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of rows for each label.
///
/// Only the labels that were seen at least once are present. The entries are
/// sorted by decreasing count, and by label for equal counts.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CountMapping {
    counts: Vec<(Label, u64)>,
}

impl CountMapping {
    pub fn from_labels<'a, I: IntoIterator<Item = &'a Label>>(labels: I) -> CountMapping {
        let mut counts: Vec<(Label, u64)> = Vec::new();
        for label in labels {
            match counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, c)) => *c += 1,
                None => counts.push((*label, 1)),
            }
        }
        counts.sort_by(|(l1, c1), (l2, c2)| c2.cmp(c1).then(l1.cmp(l2)));
        CountMapping { counts }
    }

    /// The count for a label, 0 when the label never occurred.
    pub fn get(&self, label: Label) -> u64 {
        self.counts
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.counts.iter().any(|(l, _)| *l == label)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| *c).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Label, u64)> {
        self.counts.iter()
    }
}

/// One classified row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ClassifiedRow {
    /// Position of the row in the input table (0 is the first row after the header).
    pub index: usize,
    /// The normalized content of the vote column.
    pub vote: String,
    pub label: Label,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Classification {
    pub column: VoteColumn,
    /// Stable-sorted by label.
    pub rows: Vec<ClassifiedRow>,
    pub counts: CountMapping,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NullLevel {
    High,
    Low,
}

/// How many of the classified rows ended up as `Voto Nulo`.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct NullAssessment {
    pub nulls: u64,
    pub total: u64,
    pub percent: f64,
    pub level: NullLevel,
}

impl NullAssessment {
    pub fn message(&self) -> &'static str {
        match self.level {
            NullLevel::High => {
                "The share of null votes is high, which could point to discontent among the population."
            }
            NullLevel::Low => {
                "The share of null votes is low, which suggests a clear choice between the candidates."
            }
        }
    }
}

/// Errors that prevent the classification from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ClassifyError {
    /// No column looks like it holds the votes. Carries the cleaned names of
    /// all the columns that were found.
    MissingColumn { columns: Vec<String> },
}

impl ClassifyError {
    pub const REMEDIATION_HINT: &'static str =
        "Try renaming the column that holds the votes to 'Voto'.";

    pub fn columns(&self) -> &[String] {
        match self {
            ClassifyError::MissingColumn { columns } => columns,
        }
    }
}

impl Error for ClassifyError {}

impl Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyError::MissingColumn { columns } => write!(
                f,
                "The file does not contain a vote column. Detected columns: {:?}.\n{}",
                columns,
                ClassifyError::REMEDIATION_HINT
            ),
        }
    }
}
