//! Legacy OneSky platform API.

use std::time::{SystemTime, UNIX_EPOCH};

use md5::{Digest, Md5};
use reqwest::Url;
use tracing::info;

use crate::error::Result;
use crate::services::http::{build_url, fetch_with_retry, RetryPolicy, Transport};

pub const DEFAULT_BASE_URL: &str = "https://platform.api.onesky.io/1";

#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub api_key: &'a str,
    pub secret_key: &'a str,
}

impl Credentials<'_> {
    /// `api_key`, `timestamp` and `dev_hash` request parameters.
    pub fn auth_params(&self, timestamp: u64) -> Vec<(&'static str, String)> {
        vec![
            ("api_key", self.api_key.to_string()),
            ("timestamp", timestamp.to_string()),
            ("dev_hash", dev_hash(timestamp, self.secret_key)),
        ]
    }
}

/// Lowercase hex MD5 of the decimal timestamp followed by the secret.
pub fn dev_hash(timestamp: u64, secret_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(timestamp.to_string().as_bytes());
    hasher.update(secret_key.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn app_descriptions_url(
    base_url: &str,
    project: &str,
    locale: &str,
    credentials: Credentials,
    timestamp: u64,
) -> Result<Url> {
    let path = format!("projects/{project}/translations/app-descriptions");
    let auth = credentials.auth_params(timestamp);

    let mut params: Vec<(&str, &str)> = vec![("locale", locale)];
    params.extend(auth.iter().map(|(k, v)| (*k, v.as_str())));

    build_url(base_url, &path, &params)
}

/// Signs the request with the current time and downloads the app
/// descriptions, retrying on empty bodies.
pub fn download_app_descriptions(
    transport: &dyn Transport,
    base_url: &str,
    project: &str,
    locale: &str,
    credentials: Credentials,
    policy: RetryPolicy,
) -> Result<Vec<u8>> {
    let url = app_descriptions_url(base_url, project, locale, credentials, unix_timestamp())?;

    info!(project, locale, "Downloading the app description");
    fetch_with_retry(transport, &url, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDS: Credentials<'static> = Credentials {
        api_key: "public",
        secret_key: "secret",
    };

    #[test]
    fn dev_hash_is_md5_of_timestamp_and_secret() {
        assert_eq!(
            dev_hash(1_700_000_000, "secret"),
            "4639dc588670101013c09d854e44d8c6"
        );
        assert_eq!(dev_hash(0, ""), "cfcd208495d565ef66e7dff9f98764da");
        assert_ne!(dev_hash(1_700_000_001, "secret"), dev_hash(1_700_000_000, "secret"));
    }

    #[test]
    fn url_carries_locale_and_auth() {
        let url = app_descriptions_url("https://platform.api.onesky.io/1", "42", "de", CREDS, 1234)
            .unwrap();

        assert_eq!(url.path(), "/1/projects/42/translations/app-descriptions");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("locale".to_string(), "de".to_string()),
                ("api_key".to_string(), "public".to_string()),
                ("timestamp".to_string(), "1234".to_string()),
                ("dev_hash".to_string(), dev_hash(1234, "secret")),
            ]
        );
    }

    #[test]
    fn download_signs_and_retries_empty_bodies() {
        use crate::services::http::fake::FakeTransport;
        use std::time::Duration;

        let t = FakeTransport::with_bodies([Vec::<u8>::new(), b"{}".to_vec()]);
        let policy = RetryPolicy {
            attempts: 5,
            delay: Duration::ZERO,
        };

        let body = download_app_descriptions(&t, DEFAULT_BASE_URL, "42", "de", CREDS, policy)
            .unwrap();

        assert_eq!(body, b"{}");
        assert_eq!(t.request_count(), 2);
        let url = &t.requests.borrow()[0];
        assert_eq!(url.path(), "/1/projects/42/translations/app-descriptions");
        assert!(url.query_pairs().any(|(k, _)| k == "dev_hash"));
    }

    #[test]
    fn timestamp_is_current() {
        assert!(unix_timestamp() > 1_600_000_000);
    }
}
