//! Recording host-page double.
//!
//! Implements [`HostPage`] against an in-memory model of the embedding
//! page and records every mutating call, so tests can assert on the
//! exact sequence of DOM effects a flow produced. Interior mutability
//! via a single mutex keeps the trait's `&self` signatures.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use kyc_core::domain::fields::ActionName;

use crate::application::ports::HostPage;

#[derive(Default)]
struct Inner {
    root_present: bool,
    installed: bool,
    close_button: bool,
    visible: bool,
    scroll_locked: bool,
    frame_url: Option<String>,
    set_frame_count: usize,
    fields: HashMap<String, String>,
    missing_elements: HashSet<String>,
    invalid_fields: Vec<String>,
    focused_fields: Vec<String>,
    alerts: Vec<String>,
    navigations: Vec<String>,
    bound_actions: Vec<(String, ActionName)>,
}

/// In-memory [`HostPage`] that records everything.
pub struct RecordingHostPage {
    origin: String,
    viewport_width: u32,
    inner: Mutex<Inner>,
}

impl Default for RecordingHostPage {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHostPage {
    /// A page with the root container present, a 1280px viewport, and a
    /// generic merchant origin.
    pub fn new() -> Self {
        Self {
            origin: "https://merchant.example.com".to_string(),
            viewport_width: 1280,
            inner: Mutex::new(Inner {
                root_present: true,
                ..Inner::default()
            }),
        }
    }

    // ── Builders ──────────────────────────────────────────────────────────────

    pub fn with_origin(self, origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            ..self
        }
    }

    /// Simulates a page whose overlay root container is absent.
    pub fn without_root(self) -> Self {
        self.inner.lock().unwrap().root_present = false;
        self
    }

    pub fn set_viewport_width(self, width: u32) -> Self {
        Self {
            viewport_width: width,
            ..self
        }
    }

    /// Pre-fills a form field value.
    pub fn set_field(self, dom_id: &str, value: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .fields
            .insert(dom_id.to_string(), value.to_string());
        self
    }

    /// Marks an element id as absent, so `bind_action` fails for it.
    pub fn with_missing_element(self, dom_id: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .missing_elements
            .insert(dom_id.to_string());
        self
    }

    // ── Recorded state ────────────────────────────────────────────────────────

    pub fn overlay_installed(&self) -> bool {
        self.inner.lock().unwrap().installed
    }

    pub fn close_button_rendered(&self) -> bool {
        self.inner.lock().unwrap().close_button
    }

    pub fn overlay_visible(&self) -> bool {
        self.inner.lock().unwrap().visible
    }

    pub fn scroll_locked(&self) -> bool {
        self.inner.lock().unwrap().scroll_locked
    }

    pub fn frame_url(&self) -> Option<String> {
        self.inner.lock().unwrap().frame_url.clone()
    }

    /// How many times the iframe was (re)pointed at a URL.
    pub fn set_frame_count(&self) -> usize {
        self.inner.lock().unwrap().set_frame_count
    }

    pub fn alerts(&self) -> Vec<String> {
        self.inner.lock().unwrap().alerts.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.inner.lock().unwrap().navigations.clone()
    }

    pub fn invalid_fields(&self) -> Vec<String> {
        self.inner.lock().unwrap().invalid_fields.clone()
    }

    pub fn focused_fields(&self) -> Vec<String> {
        self.inner.lock().unwrap().focused_fields.clone()
    }

    pub fn bound_actions(&self) -> Vec<(String, ActionName)> {
        self.inner.lock().unwrap().bound_actions.clone()
    }
}

impl HostPage for RecordingHostPage {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn has_overlay(&self) -> bool {
        self.inner.lock().unwrap().root_present
    }

    fn install_overlay(&self, close_button: bool) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.root_present {
            return;
        }
        inner.installed = true;
        inner.close_button = close_button;
    }

    fn show_overlay(&self) {
        self.inner.lock().unwrap().visible = true;
    }

    fn hide_overlay(&self) {
        self.inner.lock().unwrap().visible = false;
    }

    fn set_frame_url(&self, url: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.frame_url = Some(url.to_string());
        inner.set_frame_count += 1;
    }

    fn clear_frame_url(&self) {
        self.inner.lock().unwrap().frame_url = None;
    }

    fn lock_scroll(&self) {
        self.inner.lock().unwrap().scroll_locked = true;
    }

    fn unlock_scroll(&self) {
        self.inner.lock().unwrap().scroll_locked = false;
    }

    fn bind_action(&self, dom_id: &str, action: ActionName) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.missing_elements.contains(dom_id) {
            return false;
        }
        inner.bound_actions.push((dom_id.to_string(), action));
        true
    }

    fn field_value(&self, dom_id: &str) -> Option<String> {
        self.inner.lock().unwrap().fields.get(dom_id).cloned()
    }

    fn mark_field_invalid(&self, dom_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .invalid_fields
            .push(dom_id.to_string());
    }

    fn focus_field(&self, dom_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .focused_fields
            .push(dom_id.to_string());
    }

    fn alert(&self, message: &str) {
        self.inner.lock().unwrap().alerts.push(message.to_string());
    }

    fn navigate(&self, url: &str) {
        self.inner.lock().unwrap().navigations.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_dom_effects_in_order() {
        let page = RecordingHostPage::new();

        page.set_frame_url("https://a.example.com");
        page.set_frame_url("https://b.example.com");
        page.alert("first");
        page.alert("second");

        assert_eq!(page.set_frame_count(), 2);
        assert_eq!(page.frame_url().as_deref(), Some("https://b.example.com"));
        assert_eq!(page.alerts(), vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_without_root_blocks_install() {
        let page = RecordingHostPage::new().without_root();

        page.install_overlay(true);

        assert!(!page.has_overlay());
        assert!(!page.overlay_installed());
    }
}
