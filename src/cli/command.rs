//! Command-line definition.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::services::{onesky, twosky};
use crate::settings::{Settings, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Parser)]
#[command(name = "locale-sync")]
#[command(about = "Download and upload translations and store listings")]
#[command(version)]
pub struct Cli {
    /// Enable debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// TwoSky API base url
    #[arg(long, env = "TWOSKY_URL", default_value = twosky::DEFAULT_BASE_URL, global = true)]
    pub twosky_url: String,

    /// OneSky API base url
    #[arg(long, env = "ONESKY_URL", default_value = onesky::DEFAULT_BASE_URL, global = true)]
    pub onesky_url: String,

    /// HTTP timeout
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            twosky_url: self.twosky_url.clone(),
            onesky_url: self.onesky_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..Settings::default()
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download one translated strings file
    Download(DownloadArgs),
    /// Download store metadata as JSON and split it into fastlane files
    FastlaneJson(FastlaneJsonArgs),
    /// Extract one locale's store metadata from an exported workbook
    FastlaneXlsx(FastlaneXlsxArgs),
    /// Extract every configured locale from exported workbooks
    FastlaneBatch(FastlaneBatchArgs),
    /// Download store metadata from OneSky
    OneskyFastlane(OneskyFastlaneArgs),
    /// Upload a strings file
    Upload(UploadArgs),
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Translation locale (two-character)
    #[arg(short, long, value_name = "LOCALE")]
    pub locale: String,

    /// Project ID
    #[arg(short, long, value_name = "PROJECT_ID")]
    pub project: String,

    /// Output file name
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Export format
    #[arg(long, default_value = "xml")]
    pub format: String,
}

#[derive(Debug, Args)]
pub struct FastlaneJsonArgs {
    /// Translation locale (two-character)
    #[arg(short, long, value_name = "LOCALE")]
    pub locale: String,

    /// Project ID
    #[arg(short, long, value_name = "PROJECT_ID")]
    pub project: String,

    /// Input file name
    #[arg(short, long, value_name = "FILE")]
    pub input: String,

    /// Output directory name
    #[arg(short, long, value_name = "DIRECTORY")]
    pub output: PathBuf,

    /// Cache output file name
    #[arg(short, long = "cache-output", value_name = "FILE")]
    pub cache_output: PathBuf,
}

#[derive(Debug, Args)]
pub struct FastlaneXlsxArgs {
    /// Translation locale
    #[arg(short, long, value_name = "LOCALE")]
    pub locale: String,

    /// Project ID
    #[arg(short, long, value_name = "PROJECT_ID")]
    pub project: String,

    /// Input file name
    #[arg(short, long, value_name = "FILE")]
    pub input: String,

    /// Output directory name
    #[arg(short, long, value_name = "DIRECTORY")]
    pub output: PathBuf,

    /// Cache output file name
    #[arg(short, long = "cache-output", value_name = "FILE")]
    pub cache_output: PathBuf,

    /// Locale mapping config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FastlaneBatchArgs {
    /// Input file name
    #[arg(short, long, value_name = "FILE")]
    pub input: String,

    /// Root of the per-locale output directories
    #[arg(short, long, value_name = "DIRECTORY")]
    pub output: PathBuf,

    /// Cache output file name
    #[arg(short, long = "cache-output", value_name = "FILE")]
    pub cache_output: PathBuf,

    /// Locale mapping config
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,

    /// Locale requested from the service for the workbook
    #[arg(long, value_name = "LOCALE", default_value = "en")]
    pub base_locale: String,

    /// Only process this project from the config
    #[arg(short, long, value_name = "PROJECT_ID")]
    pub project: Option<String>,
}

#[derive(Debug, Args)]
pub struct OneskyFastlaneArgs {
    /// OneSky API public key
    #[arg(short = 'a', long = "apikey", value_name = "APIKEY")]
    pub api_key: String,

    /// OneSky API secret key
    #[arg(short = 's', long = "secretkey", value_name = "SECRETKEY")]
    pub secret_key: String,

    /// Translation locale (two-character)
    #[arg(short, long, value_name = "LOCALE")]
    pub locale: String,

    /// OneSky project ID
    #[arg(short, long, value_name = "PROJECT_ID")]
    pub project: String,

    /// Output folder
    #[arg(short, long, value_name = "DIRECTORY")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// File name
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// Translation locale (two-character)
    #[arg(short, long, value_name = "LOCALE")]
    pub locale: String,

    /// OneSky project ID, accepted for older callers; uploads always go to
    /// the content_blocker project
    #[arg(short, long, value_name = "PROJECT_ID")]
    pub project: Option<String>,

    /// Upload format
    #[arg(long, default_value = "xml")]
    pub format: String,

    /// API public key, signs the upload together with --secretkey
    #[arg(short = 'a', long = "apikey", value_name = "APIKEY", requires = "secret_key")]
    pub api_key: Option<String>,

    /// API secret key
    #[arg(short = 's', long = "secretkey", value_name = "SECRETKEY", requires = "api_key")]
    pub secret_key: Option<String>,
}
