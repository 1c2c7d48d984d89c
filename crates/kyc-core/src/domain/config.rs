//! Widget configuration types.
//!
//! [`WidgetConfig`] is the single source of truth for everything the host
//! page decides at construction time: which backend to talk to, which
//! credential to present, which language the remote flow renders in, and
//! the behaviour toggles (redirect handling, SMS confirmation).
//!
//! Keeping configuration as a plain struct (no global state, no
//! environment reads inside the domain) makes the widget easy to embed in
//! tests. The smoke binary is responsible for populating the struct from
//! CLI arguments or a TOML file; a browser host would populate it from
//! its embed snippet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default base URL of the remote verification widget.
///
/// Overridable per instance for staging environments; the iframe origin
/// gate in the message bridge is derived from whatever value ends up in
/// [`WidgetConfig::app_url`].
pub const DEFAULT_APP_URL: &str = "https://widget.verifold.io";

/// Error type for configuration validation and language parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `host` was empty. The widget cannot create sessions without a
    /// backend base URL.
    #[error("host is required")]
    MissingHost,

    /// `token` was empty. The backend rejects anonymous session requests.
    #[error("token is required")]
    MissingToken,

    /// `app_url` did not parse as an absolute URL, so neither the iframe
    /// target nor the message origin gate could ever be built from it.
    #[error("invalid app URL '{0}'")]
    InvalidAppUrl(String),

    /// A language tag outside the supported set was supplied.
    #[error("invalid lang '{0}' (expected pt, en, or es)")]
    InvalidLang(String),
}

// ── Language enum ─────────────────────────────────────────────────────────────

/// Languages the remote verification flow can render in.
///
/// The tag is passed verbatim as the `lang` query parameter of the
/// iframe URL, so the serialized form must match what the remote service
/// expects (`"pt"`, `"en"`, `"es"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Brazilian Portuguese (the default).
    #[default]
    Pt,
    /// English.
    En,
    /// Spanish.
    Es,
}

impl Lang {
    /// The wire form used in query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Pt => "pt",
            Lang::En => "en",
            Lang::Es => "es",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pt" => Ok(Lang::Pt),
            "en" => Ok(Lang::En),
            "es" => Ok(Lang::Es),
            other => Err(ConfigError::InvalidLang(other.to_string())),
        }
    }
}

// ── Widget configuration ──────────────────────────────────────────────────────

/// Everything the host page decides at widget construction time.
///
/// Immutable after construction except for the language, which lives in
/// the session state and can be re-set post-mount. The serde defaults
/// allow partial TOML files (smoke binary) and partial embed snippets to
/// omit every field except `host` and `token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetConfig {
    /// Base URL of the backend that issues verification sessions.
    pub host: String,

    /// API credential presented when creating a session.
    pub token: String,

    /// Initial language of the remote flow.
    #[serde(default)]
    pub lang: Lang,

    /// Base URL of the remote verification widget (iframe content).
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// When `true`, a `redirect` event from the remote flow navigates the
    /// host page to the URL carried by the event.
    #[serde(default)]
    pub enable_redirect: bool,

    /// When `true`, the overlay chrome omits its close button so the
    /// flow cannot be dismissed mid-verification.
    #[serde(default)]
    pub auto_open_validation: bool,

    /// Ask the remote flow to confirm the subject's phone via SMS.
    #[serde(default)]
    pub enable_sms_confirmation: bool,

    /// Skip document capture entirely and run only the SMS confirmation.
    #[serde(default)]
    pub only_sms_confirmation: bool,
}

fn default_app_url() -> String {
    DEFAULT_APP_URL.to_string()
}

impl WidgetConfig {
    /// Minimal configuration: required fields set, everything else at its
    /// default.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            lang: Lang::default(),
            app_url: default_app_url(),
            enable_redirect: false,
            auto_open_validation: false,
            enable_sms_confirmation: false,
            only_sms_confirmation: false,
        }
    }

    /// Checks the construction invariants: `host` and `token` non-empty,
    /// `app_url` an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if url::Url::parse(&self.app_url).is_err() {
            return Err(ConfigError::InvalidAppUrl(self.app_url.clone()));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
