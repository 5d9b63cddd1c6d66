use crate::models::status::StatusResponse;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Failures of a single `status` invocation, one variant per user-facing
/// message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("cannot reach service at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("service returned error: HTTP {status}")]
    ErrorStatus { status: StatusCode },

    #[error("invalid response format: {reason}")]
    InvalidFormat { reason: String },
}

impl ClientError {
    /// Process exit code for this failure. Zero is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            ClientError::InvalidBaseUrl { .. } | ClientError::Client(_) => 2,
            ClientError::Unreachable { .. } => 3,
            ClientError::ErrorStatus { .. } => 4,
            ClientError::InvalidFormat { .. } => 5,
        }
    }

    fn invalid_format(reason: impl Into<String>) -> Self {
        ClientError::InvalidFormat {
            reason: reason.into(),
        }
    }
}

/// Blocking client for the producer's `GET /status`.
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: Client,
    status_url: Url,
}

impl StatusClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` of `None` keeps reqwest's default.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let status_url = status_url(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Client)?;

        Ok(Self { http, status_url })
    }

    pub fn status_url(&self) -> &Url {
        &self.status_url
    }

    /// Performs one `GET /status`; no retries.
    pub fn fetch_status(&self) -> Result<StatusResponse, ClientError> {
        tracing::debug!(url = %self.status_url, "requesting status");

        let response = self
            .http
            .get(self.status_url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|source| ClientError::Unreachable {
                url: self.status_url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%status, "unexpected status code");
            return Err(ClientError::ErrorStatus { status });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        match content_type.as_deref() {
            Some(value) if is_json(value) => {}
            Some(value) => {
                return Err(ClientError::invalid_format(format!(
                    "expected application/json, got `{value}`"
                )));
            }
            None => return Err(ClientError::invalid_format("missing Content-Type header")),
        }

        let body = response.text().map_err(|source| ClientError::Unreachable {
            url: self.status_url.to_string(),
            source,
        })?;
        let parsed: StatusResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::invalid_format(e.to_string()))?;

        tracing::debug!(status = %parsed.status, "status received");
        Ok(parsed)
    }
}

/// Two-line terminal rendering of a status response.
pub fn render(response: &StatusResponse) -> String {
    format!(
        "status: {}\ncurrentDateTime: {}",
        response.status,
        response.formatted_date_time()
    )
}

fn status_url(base_url: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", base.scheme())));
    }
    if base.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join("status").map_err(|e| invalid(e.to_string()))
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media| media.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
