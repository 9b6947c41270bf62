use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::metadata::AppMetadata;
use crate::parsers::json::metadata_from_value;

// OneSky sometimes appends an error object after an otherwise valid body.
static TRAILING_ERROR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)\{"code":500.*$"#).expect("valid regex"));

pub fn strip_trailing_error(body: &str) -> &str {
    match TRAILING_ERROR.find(body) {
        Some(m) => body[..m.start()].trim(),
        None => body.trim(),
    }
}

/// Parses an app-descriptions response:
/// `{"meta": {"status": 200}, "data": {"TITLE": .., ..}}`.
pub fn parse_app_descriptions(body: &str) -> Result<AppMetadata> {
    let value: Value = serde_json::from_str(strip_trailing_error(body))?;

    let status = value
        .get("meta")
        .and_then(|m| m.get("status"))
        .and_then(|s| s.as_i64())
        .ok_or_else(|| Error::MissingField("meta.status".to_string()))?;

    if status != 200 {
        return Err(Error::ServiceStatus(status));
    }

    let data = value
        .get("data")
        .ok_or_else(|| Error::MissingField("data".to_string()))?;

    metadata_from_value(data)
}
