use crate::api::response::extract_error_message;
use crate::api::{ParsedResponse, ResponseBody};
use crate::error::Result;
use colored::*;
use std::fs;
use std::path::Path;

/// Outcome of [`save_models_output`].
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    /// Body was not JSON; nothing was written.
    RawBody(String),
}

/// Write a parsed body to `path` as pretty-printed JSON. Raw bodies are
/// handed back as text instead.
pub fn save_models_output(response: &ParsedResponse, path: &Path) -> Result<SaveOutcome> {
    match &response.body {
        ResponseBody::Parsed(value) => {
            fs::write(path, serde_json::to_string_pretty(value)?)?;
            Ok(SaveOutcome::Written)
        }
        ResponseBody::Raw(bytes) => Ok(SaveOutcome::RawBody(
            String::from_utf8_lossy(bytes).into_owned(),
        )),
    }
}

pub fn display_status(status_code: u16) {
    let line = format!("Status: {}", status_code);
    if (200..300).contains(&status_code) {
        println!("{}", line.green());
    } else {
        println!("{}", line.yellow());
    }
}

/// Print an API error body's message when present, otherwise nothing.
pub fn display_api_error(response: &ParsedResponse) {
    if let Some(message) = response.as_json().and_then(extract_error_message) {
        eprintln!("{} {}", "API error:".red(), message);
    }
}

pub fn display_error(err: &dyn std::fmt::Display) {
    eprintln!("{} {}", "Error:".red(), err);
}
