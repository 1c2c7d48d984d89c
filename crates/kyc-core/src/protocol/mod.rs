//! Protocol layer: payloads that cross the widget's process boundaries.
//!
//! Two things leave or enter the widget:
//!
//! - **`token`** – the URL-safe encoded configuration blob embedded in
//!   the iframe path, decoded by the remote verification service.
//! - **`events`** – the loosely-shaped messages the embedded flow posts
//!   back, classified into a typed union before dispatch.

pub mod events;
pub mod token;
