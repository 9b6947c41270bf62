//! Blocking HTTP transport.
//!
//! Workflows talk to the services through [`Transport`] so tests can swap in
//! a recording fake.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{multipart, Client};
use reqwest::Url;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub fields: Vec<(String, String)>,
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    /// GET `url`, returning the body of a 2xx response.
    fn get(&self, url: &Url) -> Result<Vec<u8>>;

    /// POST `form` as multipart/form-data; any status is returned as is.
    fn post_multipart(&self, url: &Url, form: UploadForm) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;

        Ok(Self { client })
    }
}

fn http_error(url: &Url, source: reqwest::Error) -> Error {
    Error::Http {
        url: redacted(url),
        source,
    }
}

/// The url without its query, which may carry credentials.
pub fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<Vec<u8>> {
        info!(url = %redacted(url), "GET");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| http_error(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: redacted(url),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().map_err(|e| http_error(url, e))?;
        debug!(bytes = body.len(), "response received");
        Ok(body.to_vec())
    }

    fn post_multipart(&self, url: &Url, form: UploadForm) -> Result<HttpResponse> {
        info!(url = %redacted(url), file = %form.file_name, "POST");

        let mut multipart_form = multipart::Form::new();
        for (name, value) in form.fields {
            multipart_form = multipart_form.text(name, value);
        }
        let part = multipart::Part::bytes(form.content).file_name(form.file_name);
        multipart_form = multipart_form.part("file", part);

        let resp = self
            .client
            .post(url.clone())
            .multipart(multipart_form)
            .send()
            .map_err(|e| http_error(url, e))?;

        let status = resp.status().as_u16();
        let body = resp.bytes().map_err(|e| http_error(url, e))?;
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

pub fn build_url(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    let parsed = if params.is_empty() {
        Url::parse(&raw)
    } else {
        Url::parse_with_params(&raw, params)
    };
    parsed.map_err(|e| Error::InvalidUrl {
        url: raw,
        message: e.to_string(),
    })
}

/// GET that treats a zero-length body as a failure.
pub fn fetch_nonempty(transport: &dyn Transport, url: &Url) -> Result<Vec<u8>> {
    let body = transport.get(url)?;
    if body.is_empty() {
        return Err(Error::EmptyResponse { url: redacted(url) });
    }
    Ok(body)
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(3),
        }
    }
}

/// GET retried with a fixed delay while the body comes back empty.
/// Transport and status errors are not retried.
pub fn fetch_with_retry(
    transport: &dyn Transport,
    url: &Url,
    policy: RetryPolicy,
) -> Result<Vec<u8>> {
    for attempt in 0..policy.attempts {
        if attempt > 0 {
            warn!("Retrying download ({}/{})...", attempt + 1, policy.attempts);
        }

        let body = transport.get(url)?;
        if !body.is_empty() {
            return Ok(body);
        }

        if attempt + 1 < policy.attempts {
            thread::sleep(policy.delay);
        }
    }

    Err(Error::EmptyResponse { url: redacted(url) })
}
