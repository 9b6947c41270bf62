use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::metadata::{AppMetadata, DESCRIPTION_KEY, SHORT_DESCRIPTION_KEY, TITLE_KEY};

/// Parses a flat `{"TITLE": .., "SHORT_DESCRIPTION": .., "DESCRIPTION": ..}`
/// document as exported by TwoSky.
pub fn parse_metadata(text: &str) -> Result<AppMetadata> {
    let value: Value = serde_json::from_str(text)?;
    metadata_from_value(&value)
}

pub fn metadata_from_value(value: &Value) -> Result<AppMetadata> {
    Ok(AppMetadata {
        title: string_field(value, TITLE_KEY)?,
        short_description: string_field(value, SHORT_DESCRIPTION_KEY)?,
        full_description: string_field(value, DESCRIPTION_KEY)?,
    })
}

fn string_field(value: &Value, key: &str) -> Result<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| Error::MissingField(key.to_string()))
}
