//! Application layer: the orchestration state machines and port traits.

pub mod actions;
pub mod bridge;
pub mod modal;
pub mod ports;
pub mod session;
pub mod widget;

use thiserror::Error;

use kyc_core::domain::config::ConfigError;
use kyc_core::domain::fields::CatalogError;

/// Errors surfaced by the public facade.
///
/// Session failures additionally raise the blocking host-page alert
/// before this error is returned; validation failures do not (they are
/// the caller's mistake, not the user's).
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The CPF did not contain exactly 11 digits after normalization.
    #[error("CPF must have exactly 11 digits")]
    InvalidCpf,

    /// A verification attempt is already waiting on the backend.
    /// Overlapping attempts are rejected rather than raced.
    #[error("a verification attempt is already in flight")]
    VerifyInFlight,

    /// The backend refused or failed to create a session. The message
    /// shown to the user went through the host-page alert.
    #[error("verification session could not be created")]
    SessionUnavailable,

    /// The overlay chrome is not present in the host page (missing root
    /// container or `mount()` never ran).
    #[error("overlay not found in host page")]
    OverlayMissing,

    /// Invalid configuration or language tag.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A field/action override named an unknown catalog entry.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The iframe URL could not be built from the configured `app_url`.
    #[error(transparent)]
    Modal(#[from] modal::ModalError),
}
