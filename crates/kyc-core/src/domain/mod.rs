//! Domain layer: pure business-logic types with no I/O.

pub mod config;
pub mod cpf;
pub mod feature;
pub mod fields;
pub mod session;
