use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::services::encoding;

/// Writes `bytes` next to `path` and renames into place, creating parent
/// directories as needed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    fs::write(&tmp, bytes).map_err(|e| Error::io(&tmp, e))?;

    if path.exists() {
        fs::remove_file(path).map_err(|e| Error::io(path, e))?;
    }

    fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "download".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}

/// Intermediate download that is removed when dropped, whatever happened
/// in between.
#[derive(Debug)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn create(path: &Path, bytes: &[u8]) -> Result<Self> {
        write_atomic(path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "cache file written");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_text(&self) -> Result<String> {
        let bytes = fs::read(&self.path).map_err(|e| Error::io(&self.path, e))?;
        Ok(encoding::decode_text(&bytes))
    }
}

impl Drop for CacheFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), "failed to remove cache file: {e}");
        }
    }
}
