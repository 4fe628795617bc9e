//! Shared building blocks for the chirp workspace: logging setup, runtime
//! environment checks and small response types used by the HTTP layer.

pub mod env;
pub mod types;
pub mod utils;
