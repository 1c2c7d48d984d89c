//! Headless host-page adapter for the smoke binary.
//!
//! There is no DOM in a terminal, so every visual operation is reduced
//! to a structured log line. Form lookups report nothing and action
//! binding always fails, which leaves the caller driving the widget
//! through its programmatic surface (`verify_document`, `handle_*`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{info, warn};

use kyc_core::domain::fields::ActionName;

use crate::application::ports::HostPage;

/// Logging [`HostPage`] with no real page behind it.
pub struct HeadlessHostPage {
    origin: String,
    viewport_width: u32,
    installed: AtomicBool,
    frame_url: Mutex<Option<String>>,
}

impl HeadlessHostPage {
    pub fn new(origin: impl Into<String>, viewport_width: u32) -> Self {
        Self {
            origin: origin.into(),
            viewport_width,
            installed: AtomicBool::new(false),
            frame_url: Mutex::new(None),
        }
    }

    /// The URL the pretend iframe was last pointed at.
    pub fn frame_url(&self) -> Option<String> {
        self.frame_url.lock().unwrap().clone()
    }
}

impl HostPage for HeadlessHostPage {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn has_overlay(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    fn install_overlay(&self, close_button: bool) {
        info!(close_button, "overlay installed");
        self.installed.store(true, Ordering::SeqCst);
    }

    fn show_overlay(&self) {
        info!("overlay shown");
    }

    fn hide_overlay(&self) {
        info!("overlay hidden");
    }

    fn set_frame_url(&self, url: &str) {
        info!(%url, "frame url set");
        *self.frame_url.lock().unwrap() = Some(url.to_string());
    }

    fn clear_frame_url(&self) {
        info!("frame url cleared");
        *self.frame_url.lock().unwrap() = None;
    }

    fn lock_scroll(&self) {
        info!("scroll locked");
    }

    fn unlock_scroll(&self) {
        info!("scroll unlocked");
    }

    fn bind_action(&self, dom_id: &str, action: ActionName) -> bool {
        info!(%action, %dom_id, "no element to bind in headless mode");
        false
    }

    fn field_value(&self, _dom_id: &str) -> Option<String> {
        None
    }

    fn mark_field_invalid(&self, dom_id: &str) {
        warn!(%dom_id, "field marked invalid");
    }

    fn focus_field(&self, dom_id: &str) {
        info!(%dom_id, "field focused");
    }

    fn alert(&self, message: &str) {
        warn!(%message, "alert");
    }

    fn navigate(&self, url: &str) {
        info!(%url, "host navigation requested");
    }
}
