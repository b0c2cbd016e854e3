//! HTTP client for the upstream employee API.
//!
//! # Responsibilities
//! - Build the request for each upstream operation
//! - Unwrap `{ "data": ... }` / `{ "status": ... }` envelopes
//! - Classify failures (transport, status, decode) without policy
//! - Time every call and record it in metrics
//!
//! Fallback decisions live in the service; this layer only reports.

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::config::UpstreamConfig;
use crate::employee::types::{
    CreateEmployeeInput, DataEnvelope, DeleteEmployeeInput, Employee, StatusEnvelope,
};
use crate::observability::metrics;

const OP_LIST: &str = "list";
const OP_GET: &str = "get";
const OP_CREATE: &str = "create";
const OP_DELETE: &str = "delete";

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Configured base URL could not be parsed.
    #[error("upstream base URL '{url}' is invalid: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP client could not be constructed.
    #[error("failed to build upstream client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, timeout, or body read failure.
    #[error("upstream {operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status.
    #[error("upstream {operation} request returned {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },

    /// Body did not match the expected envelope.
    #[error("upstream {operation} response could not be decoded: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::InvalidUrl { .. } => "invalid_url",
            UpstreamError::Build(_) => "build",
            UpstreamError::Transport { .. } => "transport",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Decode { .. } => "decode",
        }
    }
}

/// Client for the upstream employee collection resource.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Create a client for the configured base URL.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url).map_err(|source| UpstreamError::InvalidUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self { http, base_url })
    }

    /// The collection URL all calls are made against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET <base>` → every employee.
    pub async fn fetch_all(&self) -> Result<Vec<Employee>, UpstreamError> {
        let request = self.http.get(self.base_url.clone());
        self.call(OP_LIST, request, |status, body| {
            ensure_success(OP_LIST, status)?;
            decode::<DataEnvelope<Vec<Employee>>>(OP_LIST, body).map(|envelope| envelope.data)
        })
        .await
    }

    /// `GET <base>/{id}`; any 4xx is reported as `Ok(None)`.
    pub async fn fetch_one(&self, id: Uuid) -> Result<Option<Employee>, UpstreamError> {
        let request = self.http.get(self.member_url(id));
        self.call(OP_GET, request, |status, body| {
            if status.is_client_error() {
                tracing::info!(employee_id = %id, status = %status, "Employee not found upstream");
                return Ok(None);
            }
            ensure_success(OP_GET, status)?;
            decode::<DataEnvelope<Employee>>(OP_GET, body).map(|envelope| Some(envelope.data))
        })
        .await
    }

    /// `POST <base>` → the created employee.
    pub async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee, UpstreamError> {
        let request = self.http.post(self.base_url.clone()).json(input);
        self.call(OP_CREATE, request, |status, body| {
            ensure_success(OP_CREATE, status)?;
            decode::<DataEnvelope<Employee>>(OP_CREATE, body).map(|envelope| envelope.data)
        })
        .await
    }

    /// `DELETE <base>` with `{ "name": ... }` → the upstream status message.
    pub async fn delete_by_name(&self, input: &DeleteEmployeeInput) -> Result<String, UpstreamError> {
        let request = self.http.delete(self.base_url.clone()).json(input);
        self.call(OP_DELETE, request, |status, body| {
            ensure_success(OP_DELETE, status)?;
            decode::<StatusEnvelope>(OP_DELETE, body).map(|envelope| envelope.status)
        })
        .await
    }

    fn member_url(&self, id: Uuid) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    async fn call<T, F>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        handle: F,
    ) -> Result<T, UpstreamError>
    where
        F: FnOnce(StatusCode, &str) -> Result<T, UpstreamError>,
    {
        let start = Instant::now();
        let result = match send(operation, request).await {
            Ok((status, body)) => handle(status, &body),
            Err(e) => Err(e),
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::record_upstream_call(operation, outcome, start);
        result
    }
}

async fn send(
    operation: &'static str,
    request: RequestBuilder,
) -> Result<(StatusCode, String), UpstreamError> {
    let response = request
        .send()
        .await
        .map_err(|source| UpstreamError::Transport { operation, source })?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| UpstreamError::Transport { operation, source })?;

    tracing::debug!(
        operation,
        status = %status,
        body = %body,
        "Upstream response"
    );
    Ok((status, body))
}

fn ensure_success(operation: &'static str, status: StatusCode) -> Result<(), UpstreamError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(UpstreamError::Status { operation, status })
    }
}

fn decode<T: DeserializeOwned>(operation: &'static str, body: &str) -> Result<T, UpstreamError> {
    serde_json::from_str(body).map_err(|source| UpstreamError::Decode { operation, source })
}
