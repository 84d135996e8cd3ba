// Primitives for reading Excel workbooks.

use std::io::Cursor;

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use vote_classifier::builder::Builder;

use crate::tally::{io_common::non_empty, *};

/// Reads the first worksheet of the workbook at `path`.
pub fn read_excel_file(path: &str) -> TallyResult<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu {})?
        .context(ReadingExcelSnafu {})?;
    range_to_table(&wrange)
}

/// Reads the first worksheet of a workbook held in memory (an upload).
pub fn read_excel_bytes(bytes: &[u8]) -> TallyResult<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).context(ReadingExcelSnafu {})?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu {})?
        .context(ReadingExcelSnafu {})?;
    range_to_table(&wrange)
}

// The first row is the header, all the other rows are data.
// A sheet without any cell gives a table without columns.
fn range_to_table(wrange: &Range<DataType>) -> TallyResult<Table> {
    let mut iter = wrange.rows();
    let header: Vec<String> = match iter.next() {
        Some(row) => row
            .iter()
            .map(|cell| read_cell(cell).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };
    debug!("read_excel: header: {:?}", header);

    let mut builder = Builder::new(&header);
    for (idx, row) in iter.enumerate() {
        let cells: Vec<Option<String>> = row.iter().map(read_cell).collect();
        debug!("read_excel: idx: {:?} row: {:?}", idx, cells);
        builder.add_row(cells);
    }
    info!("read_excel: read {} rows", builder.num_rows());
    Ok(builder.build())
}

/// The text representation of a cell, or None for a missing value.
fn read_cell(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => non_empty(s),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::DateTime(f) => Some(f.to_string()),
        DataType::Error(e) => {
            warn!("read_excel: cell error {:?} read as a missing value", e);
            None
        }
        DataType::Empty => None,
    }
}
