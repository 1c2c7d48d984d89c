//! Cross-origin message bridge.
//!
//! Receives raw `postMessage`-style payloads from the embedded flow,
//! gates them on the sender origin, classifies them, and dispatches to
//! the host page's callbacks.
//!
//! Only messages whose sender origin matches the configured `app_url`
//! origin are processed; everything else is dropped silently (iframes
//! from unrelated widgets post constantly, and logging them at anything
//! above debug would flood the host console).

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use url::{Origin, Url};

use kyc_core::protocol::events::{Classified, EventName, EventStatus, InboundMessage, StepEvent};

use crate::application::modal::ModalController;
use crate::application::ports::HostPage;

/// Callback invoked with the event name that succeeded or failed.
pub type NameCallback = Box<dyn Fn(&str) + Send + Sync>;
/// Callback invoked with every classified step event.
pub type EventCallback = Box<dyn Fn(&StepEvent) + Send + Sync>;

/// Host-page callbacks. All optional; an absent callback is skipped.
#[derive(Default)]
pub struct Callbacks {
    /// Called when a step reports `success`, with the step name.
    pub on_success: Option<NameCallback>,
    /// Called when a step reports `error`, with the step name.
    pub on_error: Option<NameCallback>,
    /// Called with every modern step event, regardless of status.
    pub event_handler: Option<EventCallback>,
}

/// Classifies and dispatches inbound frame messages.
pub struct MessageBridge {
    expected_origin: Origin,
    enable_redirect: bool,
    callbacks: Callbacks,
    page: Arc<dyn HostPage>,
}

impl MessageBridge {
    /// `expected_origin` is the origin of the configured `app_url`; it
    /// is the only sender the bridge will listen to.
    pub fn new(
        page: Arc<dyn HostPage>,
        expected_origin: Origin,
        enable_redirect: bool,
        callbacks: Callbacks,
    ) -> Self {
        Self {
            expected_origin,
            enable_redirect,
            callbacks,
            page,
        }
    }

    /// Handles one inbound message.
    ///
    /// `origin` is the sender origin string as reported by the host
    /// environment; `payload` is the raw message data.
    pub fn handle(&self, modal: &mut ModalController, origin: &str, payload: &Value) {
        if !self.origin_allowed(origin) {
            debug!(%origin, "dropping message from unexpected origin");
            return;
        }

        match InboundMessage::parse(payload).classify() {
            Classified::Step(event) => self.dispatch_step(&event),
            Classified::Legacy(legacy) => {
                // Legacy dispatch runs every check, in order, without
                // early exit: a single message may fire a callback AND
                // close the modal, and old integrations rely on that.
                if legacy.kind == Some(EventStatus::Success) {
                    self.fire(&self.callbacks.on_success, legacy.name.as_deref().unwrap_or(""));
                }
                if legacy.name.as_deref() == Some("close-modal") {
                    modal.close();
                }
                if legacy.kind == Some(EventStatus::Error) {
                    self.fire(&self.callbacks.on_error, legacy.name.as_deref().unwrap_or(""));
                }
            }
            Classified::Unrecognized => {
                debug!("dropping unrecognized message payload");
            }
        }
    }

    fn dispatch_step(&self, event: &StepEvent) {
        if event.name == EventName::Redirect && self.enable_redirect {
            match event.url.as_deref() {
                Some(url) => {
                    debug!(%url, "redirecting host page on frame request");
                    self.page.navigate(url);
                }
                None => warn!("redirect event carried no url, ignoring"),
            }
            return;
        }

        if let Some(handler) = &self.callbacks.event_handler {
            handler(event);
        }
        match event.status {
            Some(EventStatus::Success) => self.fire(&self.callbacks.on_success, event.name.as_str()),
            Some(EventStatus::Error) => self.fire(&self.callbacks.on_error, event.name.as_str()),
            None => {}
        }
    }

    fn fire(&self, callback: &Option<NameCallback>, name: &str) {
        if let Some(callback) = callback {
            callback(name);
        }
    }

    fn origin_allowed(&self, origin: &str) -> bool {
        match Url::parse(origin) {
            Ok(url) => url.origin() == self.expected_origin,
            Err(_) => false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
