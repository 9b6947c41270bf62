use tracing::debug;

use crate::error::Result;
use crate::services::http::Transport;
use crate::services::onesky::Credentials;
use crate::services::pipeline::{
    self, BatchFastlane, JsonFastlane, OneSkyFastlane, StringsDownload, StringsUpload,
    XlsxFastlane,
};
use crate::settings::Settings;

mod command;
pub use command::{
    Cli, Command, DownloadArgs, FastlaneBatchArgs, FastlaneJsonArgs, FastlaneXlsxArgs,
    OneskyFastlaneArgs, UploadArgs,
};

/// Runs one subcommand and returns the line to report on success.
pub fn handle(command: &Command, settings: &Settings, transport: &dyn Transport) -> Result<String> {
    match command {
        Command::Download(args) => {
            let job = StringsDownload {
                locale: &args.locale,
                project: &args.project,
                output: &args.output,
                format: &args.format,
            };
            pipeline::download_strings(transport, settings, &job)?;
            Ok(format!(
                "File has been successfully downloaded to {}",
                args.output.display()
            ))
        }

        Command::FastlaneJson(args) => {
            let job = JsonFastlane {
                locale: &args.locale,
                project: &args.project,
                input: &args.input,
                output: &args.output,
                cache: &args.cache_output,
            };
            pipeline::fastlane_json(transport, settings, &job)?;
            Ok(format!(
                "App description for {} has been successfully downloaded to {}",
                args.locale,
                args.output.display()
            ))
        }

        Command::FastlaneXlsx(args) => {
            let job = XlsxFastlane {
                locale: &args.locale,
                project: &args.project,
                input: &args.input,
                output: &args.output,
                cache: &args.cache_output,
                config: args.config.as_deref(),
            };
            pipeline::fastlane_xlsx(transport, settings, &job)?;
            Ok(format!(
                "App description for {} has been successfully downloaded to {}",
                args.locale,
                args.output.display()
            ))
        }

        Command::FastlaneBatch(args) => {
            let job = BatchFastlane {
                input: &args.input,
                output: &args.output,
                cache: &args.cache_output,
                config: &args.config,
                base_locale: &args.base_locale,
                project: args.project.as_deref(),
            };
            let report = pipeline::fastlane_batch(transport, settings, &job)?;
            Ok(format!(
                "App descriptions for {} locales have been successfully downloaded to {} ({} unknown skipped)",
                report.written.len(),
                args.output.display(),
                report.unknown.len()
            ))
        }

        Command::OneskyFastlane(args) => {
            let job = OneSkyFastlane {
                credentials: Credentials {
                    api_key: &args.api_key,
                    secret_key: &args.secret_key,
                },
                locale: &args.locale,
                project: &args.project,
                output: &args.output,
            };
            pipeline::onesky_fastlane(transport, settings, &job)?;
            Ok(format!(
                "App description has been successfully downloaded to {}",
                args.output.display()
            ))
        }

        Command::Upload(args) => {
            println!(
                "Uploading {} for {} locale",
                args.file.display(),
                args.locale
            );

            if let Some(project) = &args.project {
                debug!(%project, "project flag is not sent with uploads");
            }

            let credentials = match (&args.api_key, &args.secret_key) {
                (Some(api_key), Some(secret_key)) => Some(Credentials {
                    api_key,
                    secret_key,
                }),
                _ => None,
            };
            let job = StringsUpload {
                file: &args.file,
                locale: &args.locale,
                format: &args.format,
                credentials,
            };
            pipeline::upload_strings(transport, settings, &job)?;
            Ok("Upload finished successfully.".to_string())
        }
    }
}
