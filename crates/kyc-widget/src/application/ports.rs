//! Port traits: the widget's view of its external collaborators.
//!
//! Two things live outside the orchestration core and are specified only
//! at their interface boundary:
//!
//! - [`SessionApi`] — the backend that exchanges a credential + CPF for
//!   a session handle (HTTP in production, a mock in tests).
//! - [`HostPage`] — everything the embedding page provides: the overlay
//!   chrome, form-field lookup, scroll locking, alerts, and navigation.
//!
//! Keeping these as traits means the entire state machine is testable
//! without a network or a DOM.

use async_trait::async_trait;
use thiserror::Error;

use kyc_core::domain::fields::ActionName;

// ── Session backend port ──────────────────────────────────────────────────────

/// Transport-level errors from the session backend.
///
/// These are I/O failures (unreachable host, timeout, unparseable body).
/// A well-formed refusal (`message == "error"`, missing `session_id`)
/// is NOT an error at this boundary — it comes back inside
/// [`SessionReply`] so the application layer can surface the
/// server-provided message.
#[derive(Debug, Error)]
pub enum SessionApiError {
    /// The backend could not be reached (connect failure or timeout).
    #[error("session endpoint unreachable: {0}")]
    Unreachable(String),

    /// The request failed after reaching the backend.
    #[error("session request failed: {0}")]
    RequestFailed(String),

    /// The response body was not the expected JSON shape.
    #[error("invalid session response: {0}")]
    InvalidResponse(String),
}

/// Parsed response of the session-creation endpoint.
///
/// Mirrors the wire contract `{session_id?, message?, errors?}` plus the
/// transport's success bit, so the application layer applies the failure
/// rule (`!ok || message == "error" || session_id absent`) in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReply {
    /// Whether the transport reported a 2xx status.
    pub ok: bool,
    /// The opaque session handle, when one was issued.
    pub session_id: Option<String>,
    /// Backend status note; the literal `"error"` marks a refusal even
    /// under a 2xx status.
    pub message: Option<String>,
    /// Human-readable error messages; the first one is shown to the user.
    pub errors: Vec<String>,
}

/// The backend session endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Exchanges a credential + CPF for a session handle.
    ///
    /// # Errors
    ///
    /// Returns [`SessionApiError`] only for transport-level failures;
    /// backend refusals are reported inside the [`SessionReply`].
    async fn create_session(&self, cpf: &str, token: &str) -> Result<SessionReply, SessionApiError>;
}

// ── Host page port ────────────────────────────────────────────────────────────

/// Everything the embedding page provides to the widget.
///
/// All methods are synchronous best-effort DOM operations. Missing
/// elements are soft failures: `bind_action` returns `false`,
/// `field_value` returns `None`, and the widget degrades per its error
/// taxonomy instead of crashing.
pub trait HostPage: Send + Sync {
    /// Origin of the embedding page, embedded into the session token.
    fn origin(&self) -> String;

    /// Current viewport width in logical pixels.
    fn viewport_width(&self) -> u32;

    /// Whether the overlay chrome (modal root + iframe) is present.
    fn has_overlay(&self) -> bool;

    /// Builds the overlay chrome inside the well-known root container.
    /// `close_button` controls whether the dismiss button is rendered.
    /// Calling this twice rebuilds the chrome; that is accepted.
    fn install_overlay(&self, close_button: bool);

    /// Makes the overlay visible.
    fn show_overlay(&self);

    /// Hides the overlay.
    fn hide_overlay(&self);

    /// Points the embedded iframe at `url`.
    fn set_frame_url(&self, url: &str);

    /// Clears the iframe's navigation target, stopping any in-flight
    /// camera/microphone usage inside it.
    fn clear_frame_url(&self);

    /// Disables host-page scrolling while the overlay is up.
    fn lock_scroll(&self);

    /// Restores host-page scrolling.
    fn unlock_scroll(&self);

    /// Wires a click on the element with `dom_id` to the named action.
    /// Returns `false` when no such element exists (the action stays
    /// inert; not an error).
    fn bind_action(&self, dom_id: &str, action: ActionName) -> bool;

    /// Reads the current value of the form field with `dom_id`.
    fn field_value(&self, dom_id: &str) -> Option<String>;

    /// Flags a form field as invalid (visual feedback only).
    fn mark_field_invalid(&self, dom_id: &str);

    /// Moves input focus to a form field.
    fn focus_field(&self, dom_id: &str);

    /// Shows a blocking notification to the user.
    fn alert(&self, message: &str);

    /// Navigates the host page itself to `url` (redirect events).
    fn navigate(&self, url: &str);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reply_is_a_refusal() {
        // An all-default reply must never be mistaken for success.
        let reply = SessionReply::default();
        assert!(!reply.ok);
        assert!(reply.session_id.is_none());
        assert!(reply.errors.is_empty());
    }

    #[tokio::test]
    async fn test_mock_session_api_round_trips_a_reply() {
        let mut api = MockSessionApi::new();
        api.expect_create_session().returning(|_, _| {
            Ok(SessionReply {
                ok: true,
                session_id: Some("abc".to_string()),
                message: Some("ok".to_string()),
                errors: vec![],
            })
        });

        let reply = api.create_session("11144477735", "secret").await.unwrap();
        assert_eq!(reply.session_id.as_deref(), Some("abc"));
    }
}
