//! # kyc-core
//!
//! Shared library for the KYC widget containing the domain model
//! (configuration, session state, feature selection, field/action
//! catalogs, CPF validation) and the wire payloads exchanged with the
//! remote verification service (the URL-safe session token and the
//! cross-origin message protocol).
//!
//! This crate is used by the orchestration crate (`kyc-widget`) and by
//! any future host-side integration. It has zero dependencies on HTTP
//! clients, async runtimes, or anything resembling a DOM.
//!
//! # Architecture overview
//!
//! The widget lets a host web page hand off identity-document
//! verification to a remote hosted flow: it creates a session with the
//! backend, opens an overlay iframe pointing at the remote widget
//! (camera capture on handheld viewports, QR-code handoff on desktop),
//! and relays status events back to the host page.
//!
//! This crate defines:
//!
//! - **`domain`** – Pure business logic: widget configuration and the
//!   language enum, the per-instance session state, the viewport→feature
//!   rule, the field/action catalogs with their override semantics, and
//!   the CPF checksum validator.
//!
//! - **`protocol`** – What travels across process boundaries: the
//!   base64url session token embedded in the iframe path, and the
//!   classification of loosely-shaped messages posted back by the
//!   embedded flow.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `kyc_core::Feature` instead of `kyc_core::domain::feature::Feature`.
pub use domain::config::{ConfigError, Lang, WidgetConfig, DEFAULT_APP_URL};
pub use domain::feature::{Feature, FEATURE_BREAKPOINT_PX};
pub use domain::fields::{ActionCatalog, ActionName, CatalogError, FieldCatalog, FieldDescriptor};
pub use domain::session::SessionState;
pub use protocol::events::{Classified, EventName, EventStatus, InboundMessage, StepEvent};
pub use protocol::token::{SessionTokenPayload, TokenError};
