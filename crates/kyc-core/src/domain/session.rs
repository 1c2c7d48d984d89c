//! Per-instance session state.
//!
//! One [`SessionState`] exists per widget instance and is the single
//! source of truth for everything a verify attempt produces. Components
//! never keep their own copy of the session id or the encoded token;
//! they read through this struct and only the session-creation path
//! writes it. Nothing survives a page reload by design.

use crate::domain::config::Lang;

/// Mutable state accumulated over one widget lifetime.
///
/// Created empty at construction. A successful session creation fills
/// `session_id` and `encoded_payload`; a subsequent verify attempt
/// simply overwrites them (there is no explicit reset).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Opaque backend session handle, absent until a session is created.
    pub session_id: Option<String>,
    /// Host-supplied correlation id, threaded into the iframe URL as
    /// `refId` and surfaced back in callbacks.
    pub reference_id: Option<String>,
    /// URL-safe encoded token for the current session, derived once per
    /// session creation.
    pub encoded_payload: Option<String>,
    /// Current language. Mutable post-mount via `set_lang`.
    pub lang: Lang,
    /// Base URL of the remote widget. Fixed after construction.
    app_url: String,
}

impl SessionState {
    /// Creates the empty state for a new widget instance.
    pub fn new(lang: Lang, app_url: String) -> Self {
        Self {
            session_id: None,
            reference_id: None,
            encoded_payload: None,
            lang,
            app_url,
        }
    }

    /// The fixed remote widget base URL.
    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    /// Records a freshly created session, replacing whatever a previous
    /// attempt left behind.
    pub fn begin_session(&mut self, session_id: String, encoded_payload: String) {
        self.session_id = Some(session_id);
        self.encoded_payload = Some(encoded_payload);
    }

    /// True once a session id and its encoded token are both present.
    pub fn has_session(&self) -> bool {
        self.session_id.is_some() && self.encoded_payload.is_some()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
