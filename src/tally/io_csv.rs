// Primitives for reading CSV files.

use std::io::Read;

use vote_classifier::builder::Builder;

use crate::tally::{io_common::non_empty, *};

pub fn read_csv_file(path: &str) -> TallyResult<Table> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    read_records(rdr)
}

fn read_records<R: Read>(mut rdr: csv::Reader<R>) -> TallyResult<Table> {
    let header: Vec<String> = rdr
        .headers()
        .context(ReadingCsvSnafu {})?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv: header: {:?}", header);

    let mut builder = Builder::new(&header);
    for (idx, line_r) in rdr.into_records().enumerate() {
        let line = line_r.context(ReadingCsvSnafu {})?;
        let cells: Vec<Option<String>> = line.iter().map(non_empty).collect();
        debug!("read_csv: idx: {:?} row: {:?}", idx, cells);
        builder.add_row(cells);
    }
    info!("read_csv: read {} rows", builder.num_rows());
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::tests::test_data;

    #[test]
    fn read_file() {
        let t = read_csv_file(&test_data("votes.csv")).unwrap();
        assert_eq!(t.columns, vec!["id".to_string(), "Elección".to_string()]);
        assert_eq!(t.num_rows(), 5);
        assert_eq!(t.cell(3, 1), None);
    }

    fn read_str(data: &str) -> TallyResult<Table> {
        read_records(
            csv::ReaderBuilder::new()
                .flexible(true)
                .from_reader(data.as_bytes()),
        )
    }

    #[test]
    fn ragged_rows() {
        let data = "ID,Voto,Extra\n1,Noboa\n2,Luisa,x,y\n";
        let t = read_str(data).unwrap();
        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.cell(0, 2), None);
        assert_eq!(t.cell(1, 1), Some("Luisa"));
    }

    #[test]
    fn quoted_fields() {
        let data = "ID,Voto\n1,\"Noboa, sin duda\"\n";
        let t = read_str(data).unwrap();
        assert_eq!(t.cell(0, 1), Some("Noboa, sin duda"));
    }

    #[test]
    fn missing_file() {
        let err = read_csv_file(&test_data("does_not_exist.csv")).unwrap_err();
        assert!(err.is_parse_error());
    }
}
