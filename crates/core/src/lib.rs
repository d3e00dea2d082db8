//! Core business logic for lokamap.

pub mod services;

pub use services::*;
