//! TwoSky translation service endpoints.

use std::path::Path;

use reqwest::Url;
use tracing::info;

use crate::error::{Error, Result};
use crate::services::http::{build_url, fetch_nonempty, Transport, UploadForm};
use crate::services::onesky::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://twosky.adtidy.org/api/v1";

/// Project every upload is filed under.
pub const UPLOAD_PROJECT: &str = "content_blocker";

#[derive(Debug, Clone, Copy)]
pub struct DownloadQuery<'a> {
    pub format: &'a str,
    pub language: &'a str,
    pub filename: &'a str,
    pub project: &'a str,
}

pub fn download_url(base_url: &str, query: &DownloadQuery) -> Result<Url> {
    build_url(
        base_url,
        "download",
        &[
            ("format", query.format),
            ("language", query.language),
            ("filename", query.filename),
            ("project", query.project),
        ],
    )
}

/// Downloads one exported file; an empty body is an error.
pub fn download(
    transport: &dyn Transport,
    base_url: &str,
    query: &DownloadQuery,
) -> Result<Vec<u8>> {
    let url = download_url(base_url, query)?;
    fetch_nonempty(transport, &url)
}

pub struct UploadRequest<'a> {
    pub file_name: String,
    pub content: Vec<u8>,
    pub format: &'a str,
    pub language: &'a str,
    pub credentials: Option<Credentials<'a>>,
    pub timestamp: u64,
}

impl UploadRequest<'_> {
    fn into_form(self) -> UploadForm {
        let mut fields = vec![
            ("filename".to_string(), self.file_name.clone()),
            ("format".to_string(), self.format.to_string()),
            ("language".to_string(), self.language.to_string()),
            ("project".to_string(), UPLOAD_PROJECT.to_string()),
        ];

        if let Some(credentials) = self.credentials {
            fields.extend(
                credentials
                    .auth_params(self.timestamp)
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v)),
            );
        }

        UploadForm {
            fields,
            file_name: self.file_name,
            content: self.content,
        }
    }
}

pub fn upload(transport: &dyn Transport, base_url: &str, request: UploadRequest) -> Result<()> {
    let url = build_url(base_url, "upload", &[])?;
    let resp = transport.post_multipart(&url, request.into_form())?;

    if !resp.is_success() {
        return Err(Error::UploadRejected {
            status: resp.status,
            body: String::from_utf8_lossy(&resp.body).into_owned(),
        });
    }

    info!(status = resp.status, "upload accepted");
    Ok(())
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::fake::FakeTransport;

    fn request(credentials: Option<Credentials<'static>>) -> UploadRequest<'static> {
        UploadRequest {
            file_name: "strings.xml".into(),
            content: b"<resources/>".to_vec(),
            format: "xml",
            language: "en",
            credentials,
            timestamp: 99,
        }
    }

    #[test]
    fn download_url_matches_service_layout() {
        let q = DownloadQuery {
            format: "xml",
            language: "sk",
            filename: "strings.xml",
            project: "android",
        };
        assert_eq!(
            download_url(DEFAULT_BASE_URL, &q).unwrap().as_str(),
            "https://twosky.adtidy.org/api/v1/download?format=xml&language=sk&filename=strings.xml&project=android"
        );
    }

    #[test]
    fn download_returns_body_bytes() {
        let t = FakeTransport::with_bodies([b"<resources/>".to_vec()]);
        let q = DownloadQuery {
            format: "xml",
            language: "de",
            filename: "strings.xml",
            project: "android",
        };
        assert_eq!(download(&t, DEFAULT_BASE_URL, &q).unwrap(), b"<resources/>");
    }

    #[test]
    fn upload_sends_form_fields_and_file() {
        let t = FakeTransport::with_upload_response(200, "{}");
        upload(&t, DEFAULT_BASE_URL, request(None)).unwrap();

        let uploads = t.uploads.borrow();
        let form = &uploads[0];
        assert_eq!(form.file_name, "strings.xml");
        assert_eq!(form.content, b"<resources/>");
        assert!(form
            .fields
            .contains(&("project".to_string(), "content_blocker".to_string())));
        assert!(!form.fields.iter().any(|(k, _)| k == "dev_hash"));
        assert_eq!(
            t.requests.borrow()[0].as_str(),
            "https://twosky.adtidy.org/api/v1/upload"
        );
    }

    #[test]
    fn signed_upload_adds_dev_hash() {
        let t = FakeTransport::with_upload_response(200, "{}");
        let creds = Credentials {
            api_key: "k",
            secret_key: "s",
        };
        upload(&t, DEFAULT_BASE_URL, request(Some(creds))).unwrap();

        let uploads = t.uploads.borrow();
        let expected = crate::services::onesky::dev_hash(99, "s");
        assert!(uploads[0]
            .fields
            .contains(&("dev_hash".to_string(), expected)));
    }

    #[test]
    fn rejected_upload_keeps_status_and_body() {
        let t = FakeTransport::with_upload_response(400, "bad language");
        match upload(&t, DEFAULT_BASE_URL, request(None)) {
            Err(Error::UploadRejected { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad language");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn file_name_is_basename() {
        assert_eq!(
            file_name_of(Path::new("app/src/main/res/values/strings.xml")),
            "strings.xml"
        );
    }
}
