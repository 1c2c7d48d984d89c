//! kyc-widget library crate.
//!
//! This crate orchestrates the embeddable KYC verification widget: it
//! creates a verification session with the backend, opens an overlay
//! iframe pointing at the remote hosted flow, and relays status events
//! posted by that flow back to the host page.
//!
//! # Architecture
//!
//! ```text
//! Host page (DOM, form fields, callbacks)
//!         ↕
//! [kyc-widget]
//!   ├── application/      Modal state machine, verify flow, message
//!   │                     bridge, action dispatch, public facade,
//!   │                     port traits (HostPage, SessionApi)
//!   └── infrastructure/
//!         ├── session_api/ reqwest adapter for the session endpoint
//!         └── host_page/   host-page adapters (recording double for
//!                          tests, headless adapter for the binary)
//!         ↕
//! Backend  (multipart POST /external/kyc/session)
//! Remote flow  (iframe + cross-origin messages)
//! ```
//!
//! # Layer rules
//!
//! - `application` depends on `kyc-core` and the port traits only; no
//!   HTTP client and no DOM assumptions.
//! - `infrastructure` implements the ports with `reqwest` and whatever
//!   the embedding environment provides.
//!
//! A browser host drives the widget through [`Widget`]: construct,
//! `mount()`, then forward clicks to `dispatch_action`, resize events to
//! `handle_resize`, and cross-origin messages to `handle_message`.

/// Application layer: orchestration logic and port traits.
pub mod application;

/// Infrastructure layer: reqwest session adapter and host-page adapters.
pub mod infrastructure;

pub use application::bridge::Callbacks;
pub use application::modal::ModalState;
pub use application::ports::{HostPage, SessionApi, SessionApiError, SessionReply};
pub use application::widget::Widget;
pub use application::WidgetError;
pub use infrastructure::host_page::headless::HeadlessHostPage;
pub use infrastructure::host_page::recording::RecordingHostPage;
pub use infrastructure::session_api::HttpSessionApi;
