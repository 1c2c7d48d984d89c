//! Public facade tying the flows together.
//!
//! [`Widget`] owns the configuration, the session state, both catalogs,
//! the modal controller, and the message bridge. A host embeds it by
//! constructing it with its [`HostPage`] / [`SessionApi`] adapters,
//! calling [`Widget::mount`], and then forwarding UI events:
//!
//! - clicks on bound elements → [`Widget::dispatch_action`]
//! - viewport resizes → [`Widget::handle_resize`]
//! - cross-origin frame messages → [`Widget::handle_message`]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use kyc_core::domain::config::{ConfigError, Lang, WidgetConfig};
use kyc_core::domain::cpf;
use kyc_core::domain::fields::{ActionCatalog, ActionName, FieldCatalog};
use kyc_core::domain::session::SessionState;

use crate::application::actions::bind_actions;
use crate::application::bridge::{Callbacks, MessageBridge};
use crate::application::modal::{ModalController, ModalState};
use crate::application::ports::{HostPage, SessionApi};
use crate::application::session::create_session;
use crate::application::WidgetError;

/// The embeddable verification widget.
pub struct Widget {
    config: WidgetConfig,
    state: SessionState,
    fields: FieldCatalog,
    actions: ActionCatalog,
    modal: ModalController,
    bridge: MessageBridge,
    page: Arc<dyn HostPage>,
    api: Arc<dyn SessionApi>,
    verify_flag: Arc<AtomicBool>,
}

impl Widget {
    /// Validates the configuration and assembles the widget.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Config`] when the configuration is incomplete or
    /// the `app_url` does not parse.
    pub fn new(
        config: WidgetConfig,
        callbacks: Callbacks,
        page: Arc<dyn HostPage>,
        api: Arc<dyn SessionApi>,
    ) -> Result<Self, WidgetError> {
        config.validate()?;
        let app_origin = Url::parse(&config.app_url)
            .map_err(|e| ConfigError::InvalidAppUrl(e.to_string()))?
            .origin();

        let state = SessionState::new(config.lang, config.app_url.clone());
        let modal = ModalController::new(page.clone());
        let bridge = MessageBridge::new(
            page.clone(),
            app_origin,
            config.enable_redirect,
            callbacks,
        );

        Ok(Self {
            config,
            state,
            fields: FieldCatalog::new(),
            actions: ActionCatalog::new(),
            modal,
            bridge,
            page,
            api,
            verify_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Installs the overlay chrome and binds the catalog actions.
    ///
    /// The close button is rendered unless `auto_open_validation` is
    /// set, in which case the flow itself decides when to dismiss.
    pub fn mount(&self) {
        self.page.install_overlay(!self.config.auto_open_validation);
        let bound = bind_actions(self.page.as_ref(), &self.actions);
        info!(bound, "widget mounted");
    }

    // ── Verification flow ─────────────────────────────────────────────────────

    /// Creates a session for `cpf` and opens the verification modal.
    ///
    /// The CPF must already be known-valid; only its length is checked
    /// here (the checksum gate belongs to the action path, where the
    /// field can be flagged). At most one attempt may be in flight at a
    /// time; overlapping calls fail fast with
    /// [`WidgetError::VerifyInFlight`] instead of racing two sessions.
    pub async fn verify_document(
        &mut self,
        cpf: &str,
        reference_id: Option<&str>,
    ) -> Result<(), WidgetError> {
        let _guard = InFlightGuard::acquire(&self.verify_flag).ok_or(WidgetError::VerifyInFlight)?;

        let digits = cpf::normalize(cpf);
        if digits.len() != 11 {
            return Err(WidgetError::InvalidCpf);
        }
        if !self.page.has_overlay() {
            warn!("overlay chrome missing, cannot verify");
            return Err(WidgetError::OverlayMissing);
        }

        self.state.reference_id = reference_id.map(str::to_string);
        let Some(_session_id) = create_session(
            self.api.as_ref(),
            self.page.as_ref(),
            &self.config,
            &mut self.state,
            &digits,
        )
        .await
        else {
            return Err(WidgetError::SessionUnavailable);
        };

        self.modal.open(&self.state, self.page.viewport_width())?;
        Ok(())
    }

    /// Runs the flow behind a bound UI action.
    ///
    /// The verify path reads the CPF from the catalog's field, flags the
    /// field when it does not hold 11 digits, and otherwise delegates to
    /// [`Widget::verify_document`]. Only the length is gated here: a
    /// checksum-invalid CPF still reaches the backend, whose own error
    /// message comes back through the alert. Action failures are logged,
    /// not returned: clicks have no caller to propagate to.
    pub async fn dispatch_action(&mut self, action: ActionName) {
        match action {
            ActionName::Verify => {
                let Some(dom_id) = self.fields.dom_id("cpf").map(str::to_string) else {
                    warn!("cpf field missing from catalog");
                    return;
                };
                let Some(raw) = self.page.field_value(&dom_id) else {
                    warn!(%dom_id, "cpf field not found in host page");
                    return;
                };
                let digits = cpf::normalize(&raw);
                if digits.len() != 11 {
                    debug!(%dom_id, "cpf does not have 11 digits, flagging field");
                    self.page.mark_field_invalid(&dom_id);
                    self.page.focus_field(&dom_id);
                    return;
                }

                let ref_id = self
                    .fields
                    .dom_id("referenceId")
                    .and_then(|id| self.page.field_value(id))
                    .filter(|v| !v.trim().is_empty());

                if let Err(err) = self.verify_document(&digits, ref_id.as_deref()).await {
                    warn!(error = %err, "verify action failed");
                }
            }
            ActionName::Close => self.modal.close(),
        }
    }

    // ── Host-driven events ────────────────────────────────────────────────────

    /// Forwards one inbound cross-origin message to the bridge.
    pub fn handle_message(&mut self, origin: &str, payload: &Value) {
        self.bridge.handle(&mut self.modal, origin, payload);
    }

    /// Re-evaluates the feature choice after a viewport resize.
    pub fn handle_resize(&mut self, viewport_width: u32) {
        if let Err(err) = self.modal.handle_resize(&self.state, viewport_width) {
            warn!(error = %err, "resize handling failed");
        }
    }

    /// Switches the widget language. An open modal has its frame URL's
    /// `lang` parameter rewritten in place.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Config`] when `lang` is not a supported tag.
    pub fn set_lang(&mut self, lang: &str) -> Result<(), WidgetError> {
        let parsed: Lang = lang.parse()?;
        self.state.lang = parsed;
        self.modal.refresh_lang(parsed);
        Ok(())
    }

    /// Dismisses the overlay.
    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    // ── Catalog overrides ─────────────────────────────────────────────────────

    /// Points a semantic field at a different DOM element id.
    pub fn change_field_id(&mut self, name: &str, dom_id: &str) -> Result<(), WidgetError> {
        self.fields.override_dom_id(name, dom_id)?;
        Ok(())
    }

    /// Points a UI action at a different DOM element id.
    pub fn change_action_id(&mut self, name: &str, dom_id: &str) -> Result<(), WidgetError> {
        self.actions.override_dom_id(name, dom_id)?;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Standalone CPF checksum check, exposed for host-side validation.
    pub fn check_cpf(&self, cpf: &str) -> bool {
        cpf::is_valid(cpf)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.state.session_id.as_deref()
    }

    pub fn modal_state(&self) -> ModalState {
        self.modal.state()
    }

    /// The iframe URL of the open modal, if any.
    pub fn frame_url(&self) -> Option<&Url> {
        self.modal.frame_url()
    }

    pub fn lang(&self) -> Lang {
        self.state.lang
    }
}

/// RAII marker for the single in-flight verification slot.
///
/// Releasing on `Drop` means a cancelled (dropped) verify future frees
/// the slot too; a plain boolean toggle would stay wedged.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(Self { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
