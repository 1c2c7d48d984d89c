//! Host-page adapters.
//!
//! The real widget runs inside a browser, where the host page is the
//! DOM. This crate ships two stand-ins for environments without one:
//!
//! - [`recording::RecordingHostPage`] — a test double that records every
//!   call for later assertions.
//! - [`headless::HeadlessHostPage`] — a logging adapter used by the
//!   smoke binary to exercise the full flow from a terminal.

pub mod headless;
pub mod recording;
