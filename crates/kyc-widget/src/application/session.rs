//! Session creation flow.
//!
//! Exchanges the configured credential + a normalized CPF for a session
//! handle, then seals `{token, origin, session_id, SMS flags}` into the
//! URL-safe payload the remote flow expects on its path.
//!
//! Every failure mode — transport error, backend refusal, missing
//! `session_id` — ends the same way: a blocking alert on the host page
//! and `None` back to the caller. The alert text is the first
//! server-provided error when one exists, otherwise the fixed fallback.

use tracing::{debug, warn};

use kyc_core::domain::config::WidgetConfig;
use kyc_core::domain::session::SessionState;
use kyc_core::protocol::token::{self, SessionTokenPayload};

use crate::application::ports::{HostPage, SessionApi};

/// Alert text when the backend supplied no usable error message.
pub(crate) const FALLBACK_SESSION_ERROR: &str = "Erro desconhecido!";

/// Runs the full session-creation exchange.
///
/// On success the state is updated with the new session id and encoded
/// payload, and the session id is returned. On any failure the host page
/// has already been alerted and `None` is returned.
pub async fn create_session(
    api: &dyn SessionApi,
    page: &dyn HostPage,
    config: &WidgetConfig,
    state: &mut SessionState,
    cpf: &str,
) -> Option<String> {
    let reply = match api.create_session(cpf, &config.token).await {
        Ok(reply) => reply,
        Err(err) => {
            warn!(error = %err, "session request failed before a reply was received");
            page.alert(FALLBACK_SESSION_ERROR);
            return None;
        }
    };

    let refused = !reply.ok || reply.message.as_deref() == Some("error");
    let session_id = match (&reply.session_id, refused) {
        (Some(id), false) => id.clone(),
        _ => {
            let shown = reply
                .errors
                .first()
                .map(String::as_str)
                .unwrap_or(FALLBACK_SESSION_ERROR);
            warn!(
                ok = reply.ok,
                message = reply.message.as_deref().unwrap_or(""),
                "backend refused to create a session"
            );
            page.alert(shown);
            return None;
        }
    };

    let payload = SessionTokenPayload {
        token: config.token.clone(),
        origin: page.origin(),
        session_id: session_id.clone(),
        enable_sms_confirmation: config.enable_sms_confirmation,
        only_sms_confirmation: config.only_sms_confirmation,
    };
    let encoded = match token::encode(&payload) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!(error = %err, "failed to encode session payload");
            page.alert(FALLBACK_SESSION_ERROR);
            return None;
        }
    };

    debug!(session_id = %session_id, "session created");
    state.begin_session(session_id.clone(), encoded);
    Some(session_id)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockSessionApi, SessionApiError, SessionReply};
    use crate::infrastructure::host_page::recording::RecordingHostPage;
    use kyc_core::domain::config::Lang;

    fn config() -> WidgetConfig {
        let mut config = WidgetConfig::new("https://api.example.com", "secret-token");
        config.enable_sms_confirmation = true;
        config
    }

    fn state() -> SessionState {
        SessionState::new(Lang::Pt, "https://widget.verifold.io".to_string())
    }

    #[tokio::test]
    async fn test_successful_exchange_seals_payload_into_state() {
        // Arrange
        let mut api = MockSessionApi::new();
        api.expect_create_session()
            .withf(|cpf, token| cpf == "11144477735" && token == "secret-token")
            .returning(|_, _| {
                Ok(SessionReply {
                    ok: true,
                    session_id: Some("sess-42".to_string()),
                    message: Some("ok".to_string()),
                    errors: vec![],
                })
            });
        let page = RecordingHostPage::new().with_origin("https://merchant.example.com");
        let mut state = state();

        // Act
        let sid = create_session(&api, &page, &config(), &mut state, "11144477735").await;

        // Assert
        assert_eq!(sid.as_deref(), Some("sess-42"));
        assert_eq!(state.session_id.as_deref(), Some("sess-42"));
        let decoded =
            token::decode(state.encoded_payload.as_deref().unwrap()).expect("payload decodes");
        assert_eq!(decoded.session_id, "sess-42");
        assert_eq!(decoded.origin, "https://merchant.example.com");
        assert_eq!(decoded.token, "secret-token");
        assert!(decoded.enable_sms_confirmation);
        assert!(!decoded.only_sms_confirmation);
        assert!(page.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_alerts_fallback_message() {
        let mut api = MockSessionApi::new();
        api.expect_create_session()
            .returning(|_, _| Err(SessionApiError::Unreachable("connect timeout".to_string())));
        let page = RecordingHostPage::new();
        let mut state = state();

        let sid = create_session(&api, &page, &config(), &mut state, "11144477735").await;

        assert!(sid.is_none());
        assert!(!state.has_session());
        assert_eq!(page.alerts(), vec![FALLBACK_SESSION_ERROR.to_string()]);
    }

    #[tokio::test]
    async fn test_backend_refusal_alerts_first_server_error() {
        let mut api = MockSessionApi::new();
        api.expect_create_session().returning(|_, _| {
            Ok(SessionReply {
                ok: true,
                session_id: None,
                message: Some("error".to_string()),
                errors: vec!["CPF bloqueado".to_string(), "second".to_string()],
            })
        });
        let page = RecordingHostPage::new();
        let mut state = state();

        let sid = create_session(&api, &page, &config(), &mut state, "11144477735").await;

        assert!(sid.is_none());
        assert_eq!(page.alerts(), vec!["CPF bloqueado".to_string()]);
    }

    #[tokio::test]
    async fn test_error_message_overrides_even_with_session_id() {
        // `message == "error"` marks a refusal even when a session id and
        // a 2xx status came along with it.
        let mut api = MockSessionApi::new();
        api.expect_create_session().returning(|_, _| {
            Ok(SessionReply {
                ok: true,
                session_id: Some("sess-ignored".to_string()),
                message: Some("error".to_string()),
                errors: vec![],
            })
        });
        let page = RecordingHostPage::new();
        let mut state = state();

        let sid = create_session(&api, &page, &config(), &mut state, "11144477735").await;

        assert!(sid.is_none());
        assert!(!state.has_session());
        assert_eq!(page.alerts(), vec![FALLBACK_SESSION_ERROR.to_string()]);
    }

    #[tokio::test]
    async fn test_non_2xx_alerts_even_with_well_formed_body() {
        let mut api = MockSessionApi::new();
        api.expect_create_session().returning(|_, _| {
            Ok(SessionReply {
                ok: false,
                session_id: Some("sess-rejected".to_string()),
                message: Some("ok".to_string()),
                errors: vec!["Token inválido".to_string()],
            })
        });
        let page = RecordingHostPage::new();
        let mut state = state();

        let sid = create_session(&api, &page, &config(), &mut state, "11144477735").await;

        assert!(sid.is_none());
        assert_eq!(page.alerts(), vec!["Token inválido".to_string()]);
    }
}
