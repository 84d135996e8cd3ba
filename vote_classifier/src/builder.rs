pub use crate::config::*;

/// A builder for assembling a table row by row.
///
/// The readers use it to turn spreadsheet cells into a [Table].
///
/// ```
/// pub use vote_classifier::builder::Builder;
/// # use vote_classifier::ClassifyError;
///
/// let mut builder = Builder::new(&["ID".to_string(), "Voto".to_string()]);
/// builder.add_row_simple(&["1", "Noboa"]);
/// builder.add_row(vec![Some("2".to_string()), None]);
///
/// let table = builder.build();
/// let res = vote_classifier::classify_table(&table)?;
/// assert_eq!(res.counts.total(), 2);
///
/// # Ok::<(), ClassifyError>(())
/// ```
pub struct Builder {
    pub(crate) _columns: Vec<String>,
    pub(crate) _rows: Vec<Vec<Option<String>>>,
}

impl Builder {
    pub fn new(columns: &[String]) -> Builder {
        Builder {
            _columns: columns.to_vec(),
            _rows: Vec::new(),
        }
    }

    /// Adds a row in which every cell is filled. Empty strings are kept as such.
    pub fn add_row_simple(&mut self, cells: &[&str]) {
        self.add_row(cells.iter().map(|s| Some(s.to_string())).collect())
    }

    /// Adds a row with potentially missing cells.
    ///
    /// The row does not need to have the same length as the header.
    pub fn add_row(&mut self, cells: Vec<Option<String>>) {
        self._rows.push(cells);
    }

    pub fn num_rows(&self) -> usize {
        self._rows.len()
    }

    pub fn build(self) -> Table {
        Table::new(self._columns, self._rows)
    }
}
