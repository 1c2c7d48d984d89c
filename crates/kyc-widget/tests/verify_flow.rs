//! Integration tests for the end-to-end verification flow.
//!
//! # Purpose
//!
//! These tests exercise the [`Widget`] through its *public* API the same
//! way a browser host would: construct with adapters, `mount()`, trigger
//! the verify action, and watch the DOM effects land on the host page.
//! They verify:
//!
//! - The happy path: a valid CPF in the conventional field produces a
//!   session, an open modal, and a fully assembled iframe URL.
//! - The error paths: backend refusals alert the host page with the
//!   server's message, and the modal stays closed.
//! - Edge cases: viewport width on either side of the feature
//!   breakpoint, re-verification after a close, and language switching
//!   of an open frame.
//!
//! # What is the verify flow?
//!
//! ```text
//! Host page                         Widget                     Backend
//! ─────────                         ──────                     ───────
//! click verify
//!   → dispatch_action(Verify)
//!                                   read + checksum CPF
//!                                   POST /external/kyc/session  → {session_id}
//!                                   seal {token, origin, sid}
//!                                   open modal, lock scroll
//! iframe shows {app_url}/{feature}/{payload}?lang=..&refId=..
//! ```
//!
//! The session backend is a scripted stub: integration tests feed it the
//! replies a real backend would produce, one per verify attempt.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;

use kyc_core::domain::config::{Lang, WidgetConfig};
use kyc_core::domain::feature::Feature;
use kyc_core::domain::fields::ActionName;
use kyc_core::protocol::token;
use kyc_widget::infrastructure::host_page::recording::RecordingHostPage;
use kyc_widget::{Callbacks, ModalState, SessionApi, SessionApiError, SessionReply, Widget};

const VALID_CPF: &str = "11144477735";

/// Stub backend that answers verify attempts from a scripted queue.
struct ScriptedSessionApi {
    replies: Mutex<Vec<Result<SessionReply, SessionApiError>>>,
    seen: Mutex<Vec<(String, String)>>,
}

impl ScriptedSessionApi {
    fn new(replies: Vec<Result<SessionReply, SessionApiError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn granting(session_id: &str) -> Self {
        Self::new(vec![Ok(SessionReply {
            ok: true,
            session_id: Some(session_id.to_string()),
            message: Some("ok".to_string()),
            errors: vec![],
        })])
    }

    fn requests(&self) -> Vec<(String, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionApi for ScriptedSessionApi {
    async fn create_session(&self, cpf: &str, token: &str) -> Result<SessionReply, SessionApiError> {
        self.seen
            .lock()
            .unwrap()
            .push((cpf.to_string(), token.to_string()));
        self.replies.lock().unwrap().remove(0)
    }
}

fn config() -> WidgetConfig {
    WidgetConfig::new("https://api.example.com", "secret-token")
}

// ── Happy path ────────────────────────────────────────────────────────────────

/// Tests the complete happy-path flow: a valid punctuated CPF in the
/// conventional field, through the verify action, to an open modal with
/// a decodable iframe URL.
#[tokio::test]
async fn test_verify_action_opens_modal_with_sealed_payload() {
    // Arrange
    let page = Arc::new(
        RecordingHostPage::new()
            .with_origin("https://merchant.example.com")
            .set_viewport_width(844)
            .set_field("kyc-hydrate-cpf", "111.444.777-35")
            .set_field("kyc-ref-id", "order-17"),
    );
    let api = Arc::new(ScriptedSessionApi::granting("sess-99"));
    let mut widget =
        Widget::new(config(), Callbacks::default(), page.clone(), api.clone()).unwrap();
    widget.mount();

    // Act
    widget.dispatch_action(ActionName::Verify).await;

    // Assert: the backend saw normalized digits and the credential.
    assert_eq!(
        api.requests(),
        vec![(VALID_CPF.to_string(), "secret-token".to_string())]
    );

    // Assert: modal open on the narrow-viewport feature, scroll locked.
    assert_eq!(widget.modal_state(), ModalState::Open(Feature::Ocr));
    assert!(page.scroll_locked());
    assert!(page.overlay_visible());

    // Assert: the frame URL decomposes into path + payload + params.
    let frame = Url::parse(&page.frame_url().unwrap()).unwrap();
    let segments: Vec<&str> = frame.path_segments().unwrap().collect();
    assert_eq!(segments[0], "ocr");
    let payload = token::decode(segments[1]).expect("payload decodes");
    assert_eq!(payload.session_id, "sess-99");
    assert_eq!(payload.token, "secret-token");
    assert_eq!(payload.origin, "https://merchant.example.com");
    let params: Vec<(String, String)> = frame
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(params.contains(&("lang".to_string(), "pt".to_string())));
    assert!(params.contains(&("refId".to_string(), "order-17".to_string())));
}

/// A wide viewport at the breakpoint picks the QR hand-off variant.
#[tokio::test]
async fn test_wide_viewport_opens_qr_code_variant() {
    let page = Arc::new(
        RecordingHostPage::new()
            .set_viewport_width(845)
            .set_field("kyc-hydrate-cpf", VALID_CPF),
    );
    let api = Arc::new(ScriptedSessionApi::granting("sess-1"));
    let mut widget = Widget::new(config(), Callbacks::default(), page.clone(), api).unwrap();
    widget.mount();

    widget.dispatch_action(ActionName::Verify).await;

    assert_eq!(widget.modal_state(), ModalState::Open(Feature::QrCode));
    assert!(page.frame_url().unwrap().contains("/qr-code/"));
}

/// A second verify after closing the first modal creates a fresh
/// session and overwrites the previous one.
#[tokio::test]
async fn test_reverify_after_close_replaces_session() {
    let page = Arc::new(RecordingHostPage::new().set_field("kyc-hydrate-cpf", VALID_CPF));
    let api = Arc::new(ScriptedSessionApi::new(vec![
        Ok(SessionReply {
            ok: true,
            session_id: Some("sess-first".to_string()),
            message: None,
            errors: vec![],
        }),
        Ok(SessionReply {
            ok: true,
            session_id: Some("sess-second".to_string()),
            message: None,
            errors: vec![],
        }),
    ]));
    let mut widget = Widget::new(config(), Callbacks::default(), page.clone(), api).unwrap();
    widget.mount();

    widget.dispatch_action(ActionName::Verify).await;
    assert_eq!(widget.session_id(), Some("sess-first"));
    widget.dispatch_action(ActionName::Close).await;

    widget.dispatch_action(ActionName::Verify).await;

    assert_eq!(widget.session_id(), Some("sess-second"));
    assert!(widget.modal_state() != ModalState::Closed);
}

// ── Error paths ───────────────────────────────────────────────────────────────

/// A backend refusal surfaces the first server error via the host-page
/// alert and leaves the modal closed.
#[tokio::test]
async fn test_backend_refusal_alerts_and_stays_closed() {
    let page = Arc::new(RecordingHostPage::new().set_field("kyc-hydrate-cpf", VALID_CPF));
    let api = Arc::new(ScriptedSessionApi::new(vec![Ok(SessionReply {
        ok: false,
        session_id: None,
        message: Some("error".to_string()),
        errors: vec!["CPF bloqueado".to_string()],
    })]));
    let mut widget = Widget::new(config(), Callbacks::default(), page.clone(), api).unwrap();
    widget.mount();

    widget.dispatch_action(ActionName::Verify).await;

    assert_eq!(page.alerts(), vec!["CPF bloqueado".to_string()]);
    assert_eq!(widget.modal_state(), ModalState::Closed);
    assert_eq!(widget.session_id(), None);
}

/// An unreachable backend falls back to the generic alert text.
#[tokio::test]
async fn test_unreachable_backend_alerts_fallback() {
    let page = Arc::new(RecordingHostPage::new().set_field("kyc-hydrate-cpf", VALID_CPF));
    let api = Arc::new(ScriptedSessionApi::new(vec![Err(
        SessionApiError::Unreachable("connect timeout".to_string()),
    )]));
    let mut widget = Widget::new(config(), Callbacks::default(), page.clone(), api).unwrap();
    widget.mount();

    widget.dispatch_action(ActionName::Verify).await;

    assert_eq!(page.alerts(), vec!["Erro desconhecido!".to_string()]);
    assert_eq!(widget.modal_state(), ModalState::Closed);
}

/// A CPF with the wrong digit count never reaches the backend; the
/// field is flagged and focused instead.
#[tokio::test]
async fn test_short_cpf_is_flagged_without_backend_call() {
    let page = Arc::new(RecordingHostPage::new().set_field("kyc-hydrate-cpf", "111.444.777"));
    let api = Arc::new(ScriptedSessionApi::new(vec![]));
    let mut widget =
        Widget::new(config(), Callbacks::default(), page.clone(), api.clone()).unwrap();
    widget.mount();

    widget.dispatch_action(ActionName::Verify).await;

    assert!(api.requests().is_empty());
    assert_eq!(page.invalid_fields(), vec!["kyc-hydrate-cpf".to_string()]);
    assert_eq!(page.focused_fields(), vec!["kyc-hydrate-cpf".to_string()]);
}

/// An 11-digit CPF with a bad checksum is the backend's call, not the
/// widget's: the request goes out and the server's refusal message is
/// what the user sees.
#[tokio::test]
async fn test_bad_checksum_cpf_reaches_backend() {
    let page = Arc::new(RecordingHostPage::new().set_field("kyc-hydrate-cpf", "12345678900"));
    let api = Arc::new(ScriptedSessionApi::new(vec![Ok(SessionReply {
        ok: false,
        session_id: None,
        message: Some("error".to_string()),
        errors: vec!["CPF inválido".to_string()],
    })]));
    let mut widget =
        Widget::new(config(), Callbacks::default(), page.clone(), api.clone()).unwrap();
    widget.mount();

    widget.dispatch_action(ActionName::Verify).await;

    assert_eq!(
        api.requests(),
        vec![("12345678900".to_string(), "secret-token".to_string())]
    );
    assert!(page.invalid_fields().is_empty());
    assert_eq!(page.alerts(), vec!["CPF inválido".to_string()]);
    assert_eq!(widget.modal_state(), ModalState::Closed);
}

// ── Post-open interactions ────────────────────────────────────────────────────

/// Switching the language rewrites the open frame's `lang` parameter
/// while keeping the payload and refId intact.
#[tokio::test]
async fn test_set_lang_on_open_modal_keeps_payload() {
    let page = Arc::new(
        RecordingHostPage::new()
            .set_field("kyc-hydrate-cpf", VALID_CPF)
            .set_field("kyc-ref-id", "order-3"),
    );
    let api = Arc::new(ScriptedSessionApi::granting("sess-7"));
    let mut widget = Widget::new(config(), Callbacks::default(), page.clone(), api).unwrap();
    widget.mount();
    widget.dispatch_action(ActionName::Verify).await;
    let before = Url::parse(&page.frame_url().unwrap()).unwrap();

    widget.set_lang("en").unwrap();

    let after = Url::parse(&page.frame_url().unwrap()).unwrap();
    assert_eq!(widget.lang(), Lang::En);
    assert_eq!(before.path(), after.path());
    let params: Vec<(String, String)> = after
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(params.contains(&("lang".to_string(), "en".to_string())));
    assert!(params.contains(&("refId".to_string(), "order-3".to_string())));
}

/// Resizing across the breakpoint swaps the open modal's variant and
/// rebuilds the frame URL for the same session.
#[tokio::test]
async fn test_resize_across_breakpoint_rebuilds_frame() {
    let page = Arc::new(
        RecordingHostPage::new()
            .set_viewport_width(600)
            .set_field("kyc-hydrate-cpf", VALID_CPF),
    );
    let api = Arc::new(ScriptedSessionApi::granting("sess-5"));
    let mut widget = Widget::new(config(), Callbacks::default(), page.clone(), api).unwrap();
    widget.mount();
    widget.dispatch_action(ActionName::Verify).await;
    assert!(page.frame_url().unwrap().contains("/ocr/"));

    widget.handle_resize(1400);

    assert_eq!(widget.modal_state(), ModalState::Open(Feature::QrCode));
    assert!(page.frame_url().unwrap().contains("/qr-code/"));
}
