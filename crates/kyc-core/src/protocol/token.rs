//! The URL-safe session token.
//!
//! After a session is created, the widget serializes a small
//! configuration record and embeds it directly as a path segment of the
//! iframe URL: `{app_url}/{feature}/{token}`. The remote service decodes
//! it to learn which credential, embedding origin, and session the frame
//! belongs to.
//!
//! Encoding is canonical JSON followed by base64url without padding
//! (RFC 4648 §5): the alphabet substitutes `+`→`-` and `/`→`_`, and the
//! trailing `=` padding is stripped, so the output is safe inside a URL
//! path segment. Encoding is deterministic — serde_json writes struct
//! fields in declaration order.
//!
//! The widget itself never needs to decode a token in production (the
//! remote service is the decoder); [`decode`] exists as the inverse
//! transform for tests and debugging.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from token encoding/decoding.
///
/// Encoding only fails for non-serializable input, which for this fixed
/// record shape is a programmer error rather than a runtime condition.
#[derive(Debug, Error)]
pub enum TokenError {
    /// JSON (de)serialization failed.
    #[error("token JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The token was not valid base64url.
    #[error("token base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// The configuration record the remote service reads out of the token.
///
/// Serde field names follow the remote contract exactly, including the
/// two camel-cased SMS flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokenPayload {
    /// The API credential the widget was constructed with.
    pub token: String,
    /// Origin of the embedding page (e.g. `"shop.example.com"`).
    pub origin: String,
    /// The backend session handle this frame belongs to.
    pub session_id: String,
    /// Ask the remote flow to confirm the subject's phone via SMS.
    #[serde(rename = "enableSMSConfirmation")]
    pub enable_sms_confirmation: bool,
    /// Run only the SMS confirmation, skipping document capture.
    #[serde(rename = "onlySMSConfirmation")]
    pub only_sms_confirmation: bool,
}

/// Encodes a payload to its URL-safe token form.
///
/// Deterministic: the same payload always yields the same token. The
/// result contains none of `+`, `/`, or `=`.
///
/// # Errors
///
/// [`TokenError::Json`] if serialization fails (not expected for this
/// record shape).
pub fn encode(payload: &SessionTokenPayload) -> Result<String, TokenError> {
    let json = serde_json::to_vec(payload)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decodes a token back into its payload — the inverse of [`encode`].
///
/// # Errors
///
/// [`TokenError::Base64`] for malformed base64url input,
/// [`TokenError::Json`] when the decoded bytes are not the expected
/// record.
pub fn decode(token: &str) -> Result<SessionTokenPayload, TokenError> {
    let json = URL_SAFE_NO_PAD.decode(token)?;
    Ok(serde_json::from_slice(&json)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
