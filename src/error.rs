//! Error type shared by every subcommand.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("error downloading content from {url}: empty response")]
    EmptyResponse { url: String },

    #[error("error uploading file: HTTP {status}\n{body}")]
    UploadRejected { status: u16, body: String },

    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("field `{0}` is missing or not a string")]
    MissingField(String),

    #[error("row label `{0}` not found in column 0")]
    MissingRowLabel(&'static str),

    #[error("no column matches locale `{0}`")]
    LocaleNotFound(String),

    #[error("service reported status {0}")]
    ServiceStatus(i64),

    #[error("workbook has no sheets")]
    EmptyWorkbook,

    #[error("invalid workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code, loosely following sysexits.h.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Http { .. }
            | Error::Status { .. }
            | Error::EmptyResponse { .. }
            | Error::UploadRejected { .. }
            | Error::ServiceStatus(_) => 1,
            Error::MissingField(_)
            | Error::MissingRowLabel(_)
            | Error::LocaleNotFound(_)
            | Error::EmptyWorkbook
            | Error::Workbook(_)
            | Error::Json(_) => 65, // EX_DATAERR
            Error::Io { .. } => 74,     // EX_IOERR
            Error::InvalidUrl { .. } | Error::Config(_) => 78, // EX_CONFIG
        }
    }
}
