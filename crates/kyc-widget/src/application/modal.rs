//! Modal overlay state machine.
//!
//! Owns the open/closed state of the verification overlay and the URL
//! the embedded iframe points at. The URL has the shape
//!
//! ```text
//! {app_url}/{feature}/{encoded_payload}?lang={lang}[&refId={reference_id}]
//! ```
//!
//! where `feature` is picked from the viewport width: narrow viewports
//! get the in-browser capture flow (`ocr`), wide viewports get the
//! hand-off QR code (`qr-code`).

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use kyc_core::domain::config::Lang;
use kyc_core::domain::feature::Feature;
use kyc_core::domain::session::SessionState;

use crate::application::ports::HostPage;

/// Errors from frame-URL construction.
#[derive(Debug, Error)]
pub enum ModalError {
    /// The configured `app_url` plus the session path did not form a
    /// valid URL.
    #[error("invalid frame URL: {0}")]
    FrameUrl(#[from] url::ParseError),
}

/// Whether the overlay is up, and which flow variant it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(Feature),
}

/// Drives the overlay through the host page.
pub struct ModalController {
    state: ModalState,
    frame_url: Option<Url>,
    page: Arc<dyn HostPage>,
}

impl ModalController {
    pub fn new(page: Arc<dyn HostPage>) -> Self {
        Self {
            state: ModalState::Closed,
            frame_url: None,
            page,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// The URL the iframe currently points at, if the modal is open.
    pub fn frame_url(&self) -> Option<&Url> {
        self.frame_url.as_ref()
    }

    /// Opens the overlay for the current session.
    ///
    /// A missing overlay or a state without a session are soft failures:
    /// both are logged and the modal stays closed. The overlay being
    /// absent here means `mount()` never ran or the host removed the
    /// root container.
    pub fn open(&mut self, session: &SessionState, viewport_width: u32) -> Result<(), ModalError> {
        if !self.page.has_overlay() {
            warn!("overlay chrome not present, modal stays closed");
            return Ok(());
        }
        if !session.has_session() {
            warn!("no active session, modal stays closed");
            return Ok(());
        }

        let feature = Feature::for_width(viewport_width);
        let url = build_frame_url(session, feature)?;
        debug!(%feature, %url, "opening verification modal");

        self.page.set_frame_url(url.as_str());
        self.page.lock_scroll();
        self.page.show_overlay();
        self.frame_url = Some(url);
        self.state = ModalState::Open(feature);
        Ok(())
    }

    /// Closes the overlay and releases the iframe (which stops any
    /// camera capture running inside it).
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        debug!("closing verification modal");
        self.page.clear_frame_url();
        self.page.unlock_scroll();
        self.page.hide_overlay();
        self.frame_url = None;
        self.state = ModalState::Closed;
    }

    /// Re-picks the feature after a viewport resize.
    ///
    /// Only acts when the modal is open AND the width crossed the
    /// feature breakpoint; same-feature resizes must not reload the
    /// iframe mid-capture.
    pub fn handle_resize(
        &mut self,
        session: &SessionState,
        viewport_width: u32,
    ) -> Result<(), ModalError> {
        let ModalState::Open(current) = self.state else {
            return Ok(());
        };
        let wanted = Feature::for_width(viewport_width);
        if wanted == current {
            return Ok(());
        }

        let url = build_frame_url(session, wanted)?;
        debug!(from = %current, to = %wanted, "viewport crossed feature breakpoint");
        self.page.set_frame_url(url.as_str());
        self.frame_url = Some(url);
        self.state = ModalState::Open(wanted);
        Ok(())
    }

    /// Rewrites only the `lang` query parameter of the open frame URL.
    /// Other parameters (notably `refId`) survive untouched. No-op when
    /// the modal is closed.
    pub fn refresh_lang(&mut self, lang: Lang) {
        let Some(mut url) = self.frame_url.take() else {
            return;
        };
        set_query_param(&mut url, "lang", lang.as_str());
        debug!(%lang, %url, "frame language updated");
        self.page.set_frame_url(url.as_str());
        self.frame_url = Some(url);
    }
}

/// Builds `{app_url}/{feature}/{payload}?lang=..[&refId=..]`.
fn build_frame_url(session: &SessionState, feature: Feature) -> Result<Url, ModalError> {
    // begin_session ran before any open, so the payload is present.
    let payload = session.encoded_payload.as_deref().unwrap_or_default();
    let base = format!(
        "{}/{}/{}",
        session.app_url().trim_end_matches('/'),
        feature.as_str(),
        payload
    );
    let mut url = Url::parse(&base)?;
    url.query_pairs_mut().append_pair("lang", session.lang.as_str());
    if let Some(ref_id) = session.reference_id.as_deref() {
        url.query_pairs_mut().append_pair("refId", ref_id);
    }
    Ok(url)
}

/// Replaces `key` in the query string, keeping every other pair in order.
fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut editor = url.query_pairs_mut();
    editor.clear();
    for (k, v) in &pairs {
        editor.append_pair(k, v);
    }
    editor.append_pair(key, value);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
