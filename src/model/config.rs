use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// One entry of the locale-mapping config file.
///
/// `languages` maps an internal locale code to the locale string used as a
/// column header in the exported workbook. `mapping` optionally renames the
/// output directory of a code.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProjectConfig {
    pub project_id: String,

    #[serde(default)]
    pub languages: HashMap<String, String>,

    #[serde(default)]
    pub mapping: HashMap<String, String>,
}

impl ProjectConfig {
    /// Locale string -> code, for resolving workbook headers. Keys have
    /// their whitespace removed the same way headers do.
    pub fn codes_by_locale(&self) -> HashMap<String, &str> {
        self.languages
            .iter()
            .map(|(code, locale)| (strip_whitespace(locale), code.as_str()))
            .collect()
    }

    /// Directory name a code is written under.
    pub fn directory_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.mapping.get(code).map(String::as_str).unwrap_or(code)
    }
}

pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn load(path: &Path) -> Result<Vec<ProjectConfig>> {
    let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    serde_json::from_str::<Vec<ProjectConfig>>(&data)
        .map_err(|e| Error::Config(format!("invalid {}: {e}", path.display())))
}

pub fn find<'a>(configs: &'a [ProjectConfig], project_id: &str) -> Option<&'a ProjectConfig> {
    configs.iter().find(|c| c.project_id == project_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "project_id": "content_blocker_google_play",
            "languages": { "de": "German", "pt_BR": "Portuguese (Brazil)" },
            "mapping": { "pt_BR": "pt-BR" }
        },
        { "project_id": "bare" }
    ]"#;

    #[test]
    fn loads_entries_with_default_maps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, SAMPLE).unwrap();

        let configs = load(&path).unwrap();
        assert_eq!(configs.len(), 2);
        assert!(find(&configs, "bare").unwrap().languages.is_empty());
        assert!(find(&configs, "missing").is_none());
    }

    #[test]
    fn inverts_languages_and_applies_mapping() {
        let configs: Vec<ProjectConfig> = serde_json::from_str(SAMPLE).unwrap();
        let cfg = &configs[0];

        let codes = cfg.codes_by_locale();
        assert_eq!(codes.get("German"), Some(&"de"));
        assert_eq!(codes.get("Portuguese(Brazil)"), Some(&"pt_BR"));
        assert_eq!(codes.get("Portuguese (Brazil)"), None);

        assert_eq!(cfg.directory_for("pt_BR"), "pt-BR");
        assert_eq!(cfg.directory_for("de"), "de");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not an array").unwrap();

        assert!(matches!(load(&path), Err(Error::Config(_))));
    }
}
