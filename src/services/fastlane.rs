use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::metadata::AppMetadata;
use crate::services::files::write_atomic;

pub const TITLE_FILE: &str = "title.txt";
pub const SHORT_DESCRIPTION_FILE: &str = "short_description.txt";
pub const FULL_DESCRIPTION_FILE: &str = "full_description.txt";

/// Writes the three fastlane metadata files into `dir`, creating it if
/// needed. Files already written stay in place if a later one fails.
pub fn write_metadata(dir: &Path, metadata: &AppMetadata) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    write_atomic(&dir.join(TITLE_FILE), metadata.title.as_bytes())?;
    write_atomic(
        &dir.join(SHORT_DESCRIPTION_FILE),
        metadata.short_description.as_bytes(),
    )?;
    write_atomic(
        &dir.join(FULL_DESCRIPTION_FILE),
        metadata.full_description.as_bytes(),
    )?;

    Ok(())
}
