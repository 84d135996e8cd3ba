use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use vote_classifier::*;

use std::fs;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::tally::io_common::InputType;

pub mod chatbot;
pub mod config_reader;
mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod report;
pub mod server;

/// Message prefix for the errors that come from reading the input.
pub const PARSE_ERROR_PREFIX: &str = "Error reading the file";

#[derive(Debug, Snafu)]
pub enum TallyError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("{source}"))]
    ReadingExcel { source: calamine::XlsxError },
    #[snafu(display("The workbook does not contain any worksheet"))]
    EmptyExcel {},
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("{source}"))]
    ReadingCsv { source: csv::Error },
    #[snafu(display("Unknown input type {input_type:?} (expected xlsx or csv)"))]
    UnknownInputType { input_type: String },

    #[snafu(display("{source}"))]
    MissingVoteColumn { source: ClassifyError },

    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}: {source}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Could not reach the chat service: {source}"))]
    Chatbot { source: reqwest::Error },
    #[snafu(display("The chat service answered with status {status}"))]
    ChatbotStatus { status: u16 },
    #[snafu(display("The answer of the chat service has no '{field}' field"))]
    ChatbotPayload { field: String },

    #[snafu(display("Cannot serve on {bind}: {source}"))]
    Serving {
        source: std::io::Error,
        bind: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error + Send + Sync>, Some)))]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type TallyResult<T> = Result<T, TallyError>;

impl TallyError {
    /// True if the input could not be interpreted as a table.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            TallyError::OpeningExcel { .. }
                | TallyError::ReadingExcel { .. }
                | TallyError::EmptyExcel {}
                | TallyError::OpeningCsv { .. }
                | TallyError::ReadingCsv { .. }
                | TallyError::UnknownInputType { .. }
        )
    }

    /// The message shown to the end user.
    pub fn user_message(&self) -> String {
        if self.is_parse_error() {
            format!("{}: {}", PARSE_ERROR_PREFIX, self)
        } else {
            self.to_string()
        }
    }
}

/// Reads the first sheet of a file into a table.
pub fn read_table(path: &str, input_type: Option<&str>) -> TallyResult<Table> {
    let it = InputType::detect(path, input_type)?;
    info!("Attempting to read {:?} file {:?}", it, path);
    match it {
        InputType::Xlsx => io_excel::read_excel_file(path),
        InputType::Csv => io_csv::read_csv_file(path),
    }
}

/// Reads a file, locates the vote column and classifies all the rows.
pub fn classify_file(path: &str, input_type: Option<&str>) -> TallyResult<Classification> {
    let table = read_table(path, input_type)?;
    debug!(
        "classify_file: columns: {:?} rows: {}",
        table.columns,
        table.num_rows()
    );
    classify_table(&table).context(MissingVoteColumnSnafu {})
}

/// The count mapping as a JSON object, label -> count.
pub fn counts_to_json(counts: &CountMapping) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (label, count) in counts.iter() {
        m.insert(label.to_string(), json!(count));
    }
    JSValue::Object(m)
}

pub fn build_summary_js(c: &Classification) -> JSValue {
    json!({
        "column": c.column.name,
        "total": c.counts.total(),
        "counts": counts_to_json(&c.counts),
    })
}

pub fn read_summary(path: &str) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: {:?}", contents);
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

fn write_summary(out: &str, pretty_js: &str) -> TallyResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js);
        Ok(())
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty_js).context(WritingOutputSnafu { path: out })
    }
}

/// Counts the votes in a file and prints the summary.
///
/// If a reference summary is provided, the computed summary must match it.
pub fn run_count(
    input: &str,
    input_type: Option<&str>,
    out: Option<&str>,
    check_summary_path: Option<&str>,
) -> TallyResult<JSValue> {
    let classification = classify_file(input, input_type)?;
    let result_js = build_summary_js(&classification);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    match out {
        Some(p) => write_summary(p, &pretty_js_stats)?,
        None => println!("{}", pretty_js_stats),
    }

    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary {:?}", summary_p);
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_str(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
        info!("Summary matches the reference {:?}", summary_p);
    }

    Ok(result_js)
}
