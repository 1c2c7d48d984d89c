//! Infrastructure layer: concrete adapters behind the application ports.

pub mod host_page;
pub mod session_api;
