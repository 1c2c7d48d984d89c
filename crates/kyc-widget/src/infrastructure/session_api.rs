//! HTTP adapter for the backend session endpoint.
//!
//! Speaks the wire contract of `POST {host}/external/kyc/session`: a
//! multipart form with `cpf` and `token` fields, answered with JSON
//! `{session_id?, message?, errors?}`. Status interpretation is left to
//! the application layer; this adapter only distinguishes "could not
//! reach / could not parse" from "got a reply".

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::application::ports::{SessionApi, SessionApiError, SessionReply};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Wire shape of the session endpoint's JSON body. Every field optional;
/// absent `errors` collapses to the empty list.
#[derive(Debug, Deserialize)]
struct SessionReplyWire {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// [`SessionApi`] implementation over `reqwest`.
pub struct HttpSessionApi {
    client: reqwest::Client,
    host: String,
}

impl HttpSessionApi {
    /// Client with the default timeouts (10s total, 5s connect).
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_timeout(host, DEFAULT_TIMEOUT)
    }

    /// Client with a custom total-request timeout.
    pub fn with_timeout(host: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            host: host.into(),
        }
    }

    fn session_endpoint(&self) -> String {
        format!("{}/external/kyc/session", self.host.trim_end_matches('/'))
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn create_session(&self, cpf: &str, token: &str) -> Result<SessionReply, SessionApiError> {
        let url = self.session_endpoint();
        let form = reqwest::multipart::Form::new()
            .text("cpf", cpf.to_string())
            .text("token", token.to_string());

        debug!(%url, "creating verification session");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    SessionApiError::Unreachable(e.to_string())
                } else {
                    SessionApiError::RequestFailed(e.to_string())
                }
            })?;

        let ok = response.status().is_success();
        let wire: SessionReplyWire = response
            .json()
            .await
            .map_err(|e| SessionApiError::InvalidResponse(e.to_string()))?;

        Ok(SessionReply {
            ok,
            session_id: wire.session_id,
            message: wire.message,
            errors: wire.errors,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
