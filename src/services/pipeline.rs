//! One workflow per subcommand: fetch, extract, write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::config::{self, ProjectConfig};
use crate::parsers::{json, onesky as onesky_parser, xlsx};
use crate::services::files::{write_atomic, CacheFile};
use crate::services::http::Transport;
use crate::services::onesky::{self, Credentials};
use crate::services::twosky::{self, DownloadQuery, UploadRequest};
use crate::services::{encoding, fastlane};
use crate::settings::Settings;

pub struct StringsDownload<'a> {
    pub locale: &'a str,
    pub project: &'a str,
    pub output: &'a Path,
    pub format: &'a str,
}

/// Saves one translated strings file verbatim.
pub fn download_strings(
    transport: &dyn Transport,
    settings: &Settings,
    job: &StringsDownload,
) -> Result<()> {
    let filename = twosky::file_name_of(job.output);
    let query = DownloadQuery {
        format: job.format,
        language: job.locale,
        filename: &filename,
        project: job.project,
    };

    let body = twosky::download(transport, &settings.twosky_url, &query)?;
    write_atomic(job.output, &body)?;

    debug!(locale = job.locale, bytes = body.len(), "strings saved");
    Ok(())
}

pub struct JsonFastlane<'a> {
    pub locale: &'a str,
    pub project: &'a str,
    pub input: &'a str,
    pub output: &'a Path,
    pub cache: &'a Path,
}

pub fn fastlane_json(
    transport: &dyn Transport,
    settings: &Settings,
    job: &JsonFastlane,
) -> Result<()> {
    let query = DownloadQuery {
        format: "json",
        language: job.locale,
        filename: job.input,
        project: job.project,
    };

    let body = twosky::download(transport, &settings.twosky_url, &query)?;
    let cache = CacheFile::create(job.cache, &body)?;
    let metadata = json::parse_metadata(&cache.read_text()?)?;

    fastlane::write_metadata(job.output, &metadata)
}

pub struct XlsxFastlane<'a> {
    pub locale: &'a str,
    pub project: &'a str,
    pub input: &'a str,
    pub output: &'a Path,
    pub cache: &'a Path,
    pub config: Option<&'a Path>,
}

/// Column header the workbook uses for `locale`.
fn target_code(locale: &str, project: &str, config_path: Option<&Path>) -> Result<String> {
    let Some(path) = config_path else {
        return Ok(locale.to_string());
    };

    let configs = config::load(path)?;
    let entry = config::find(&configs, project).ok_or_else(|| {
        Error::Config(format!("no entry for project `{project}` in {}", path.display()))
    })?;

    Ok(entry
        .languages
        .get(locale)
        .map(|l| config::strip_whitespace(l))
        .unwrap_or_else(|| locale.to_string()))
}

pub fn fastlane_xlsx(
    transport: &dyn Transport,
    settings: &Settings,
    job: &XlsxFastlane,
) -> Result<()> {
    let target = target_code(job.locale, job.project, job.config)?;

    let query = DownloadQuery {
        format: "xlsx",
        language: job.locale,
        filename: job.input,
        project: job.project,
    };

    let body = twosky::download(transport, &settings.twosky_url, &query)?;
    let cache = CacheFile::create(job.cache, &body)?;

    let sheet = xlsx::open_first_sheet(cache.path())?;
    let rows = xlsx::locate_rows(&sheet)?;
    let col = xlsx::find_locale_column(&sheet, &target)
        .ok_or_else(|| Error::LocaleNotFound(target.clone()))?;

    debug!(column = col, locale = %target, "locale column found");
    fastlane::write_metadata(job.output, &xlsx::read_column(&sheet, rows, col))
}

pub struct BatchFastlane<'a> {
    pub input: &'a str,
    pub output: &'a Path,
    pub cache: &'a Path,
    pub config: &'a Path,
    pub base_locale: &'a str,
    pub project: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output directories that received metadata.
    pub written: Vec<PathBuf>,
    /// Header codes missing from the language map.
    pub unknown: Vec<String>,
}

pub fn fastlane_batch(
    transport: &dyn Transport,
    settings: &Settings,
    job: &BatchFastlane,
) -> Result<BatchReport> {
    let configs = config::load(job.config)?;
    let selected: Vec<&ProjectConfig> = configs
        .iter()
        .filter(|c| job.project.map_or(true, |p| c.project_id == p))
        .collect();

    if selected.is_empty() {
        return Err(Error::Config(format!(
            "no matching project in {}",
            job.config.display()
        )));
    }

    let mut report = BatchReport::default();

    for project in selected {
        info!(project = %project.project_id, "extracting workbook");

        let query = DownloadQuery {
            format: "xlsx",
            language: job.base_locale,
            filename: job.input,
            project: &project.project_id,
        };

        let body = twosky::download(transport, &settings.twosky_url, &query)?;
        let cache = CacheFile::create(job.cache, &body)?;
        let sheet = xlsx::open_first_sheet(cache.path())?;
        extract_columns(&sheet, project, job.output, &mut report)?;
    }

    Ok(report)
}

fn extract_columns(
    sheet: &calamine::Range<calamine::Data>,
    project: &ProjectConfig,
    output: &Path,
    report: &mut BatchReport,
) -> Result<()> {
    let rows = xlsx::locate_rows(sheet)?;
    let codes = project.codes_by_locale();
    let Some(last) = xlsx::last_column(sheet) else {
        return Ok(());
    };

    // first column holds the labels, the last one comments
    for col in 1..last {
        let header = match xlsx::header(sheet, col) {
            xlsx::Header::Code(h) | xlsx::Header::Continuation(h) => h,
            xlsx::Header::Empty => continue,
        };

        let Some(code) = codes.get(&header) else {
            warn!(locale = %header, column = col, "unknown locale, skipping");
            report.unknown.push(header);
            continue;
        };

        let dir = output.join(project.directory_for(code));
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

        let metadata = xlsx::read_column(sheet, rows, col);
        if metadata.title.is_empty() {
            info!(locale = %code, "empty title, nothing written");
            continue;
        }

        fastlane::write_metadata(&dir, &metadata)?;
        report.written.push(dir);
    }

    Ok(())
}

pub struct OneSkyFastlane<'a> {
    pub credentials: Credentials<'a>,
    pub locale: &'a str,
    pub project: &'a str,
    pub output: &'a Path,
}

pub fn onesky_fastlane(
    transport: &dyn Transport,
    settings: &Settings,
    job: &OneSkyFastlane,
) -> Result<()> {
    let body = onesky::download_app_descriptions(
        transport,
        &settings.onesky_url,
        job.project,
        job.locale,
        job.credentials,
        settings.retry,
    )?;
    let metadata = onesky_parser::parse_app_descriptions(&encoding::decode_text(&body))?;

    fastlane::write_metadata(job.output, &metadata)
}

pub struct StringsUpload<'a> {
    pub file: &'a Path,
    pub locale: &'a str,
    pub format: &'a str,
    pub credentials: Option<Credentials<'a>>,
}

pub fn upload_strings(
    transport: &dyn Transport,
    settings: &Settings,
    job: &StringsUpload,
) -> Result<()> {
    let content = fs::read(job.file).map_err(|e| Error::io(job.file, e))?;

    let request = UploadRequest {
        file_name: twosky::file_name_of(job.file),
        content,
        format: job.format,
        language: job.locale,
        credentials: job.credentials,
        timestamp: onesky::unix_timestamp(),
    };

    twosky::upload(transport, &settings.twosky_url, request)
}
