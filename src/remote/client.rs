//! Blocking HTTP client for the Dynalist API.
//!
//! Every call is a `POST` of a JSON body carrying the API token. The
//! response envelope has `_code` ("Ok" on success) and `_msg`; anything
//! else is surfaced as [`Error::Transport`].

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::RemoteClient;
use super::types::{Document, FileList, VersionsResponse};

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dynalist.io/api/v1/";

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "DYNALIST_API_URL";

/// Dynalist API client.
pub struct DynalistClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct ReadDocRequest<'a> {
    token: &'a str,
    file_id: &'a str,
}

#[derive(Serialize)]
struct CheckForUpdatesRequest<'a> {
    token: &'a str,
    file_ids: &'a [String],
}

impl DynalistClient {
    /// Create a client against the public API.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(token, DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint.
    #[must_use]
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint,
            token: token.into(),
        }
    }

    /// Create a client, honoring `DYNALIST_API_URL` if set.
    #[must_use]
    pub fn from_env(token: impl Into<String>) -> Self {
        match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => Self::with_endpoint(token, endpoint),
            _ => Self::new(token),
        }
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, method: &str, body: &B) -> Result<T> {
        let url = format!("{}{method}", self.endpoint);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::USER_AGENT, "Mozilla/5.0")
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(Error::Transport(format!("{method} returned {status}: {text}")));
        }

        let value: serde_json::Value = response.json()?;
        check_envelope(method, &value)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Reject responses whose `_code` is not "ok".
fn check_envelope(method: &str, value: &serde_json::Value) -> Result<()> {
    let code = value.get("_code").and_then(serde_json::Value::as_str).unwrap_or("");
    if code.eq_ignore_ascii_case("ok") {
        return Ok(());
    }
    let msg = value
        .get("_msg")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("no message");
    Err(Error::Transport(format!("{method}: {code}: {msg}")))
}

impl RemoteClient for DynalistClient {
    fn list_files(&self) -> Result<FileList> {
        self.post("file/list", &TokenRequest { token: &self.token })
    }

    fn read_doc(&self, document_id: &str) -> Result<Document> {
        self.post(
            "doc/read",
            &ReadDocRequest {
                token: &self.token,
                file_id: document_id,
            },
        )
    }

    fn check_for_updates(&self, document_ids: &[String]) -> Result<IndexMap<String, u64>> {
        let response: VersionsResponse = self.post(
            "doc/check_for_updates",
            &CheckForUpdatesRequest {
                token: &self.token,
                file_ids: document_ids,
            },
        )?;
        Ok(response.versions)
    }
}
