use std::path::Path;

use crate::tally::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Xlsx,
    Csv,
}

impl InputType {
    /// The explicit input type if provided, otherwise guessed from the file extension.
    /// Files without a recognized extension are read as Excel workbooks.
    pub fn detect(path: &str, input_type: Option<&str>) -> TallyResult<InputType> {
        let it = match input_type {
            Some(s) => s.to_lowercase(),
            None => Path::new(path)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .unwrap_or_else(|| "xlsx".to_string()),
        };
        match it.as_str() {
            "xlsx" | "xlsm" | "excel" => Ok(InputType::Xlsx),
            "csv" => Ok(InputType::Csv),
            _ if input_type.is_none() => Ok(InputType::Xlsx),
            _ => UnknownInputTypeSnafu { input_type: it }.fail(),
        }
    }
}

/// Empty cells are missing values.
pub fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
