//! Library entry for pk exposing the core logic for the binary and integration tests.

pub mod config;
pub mod error;
pub mod install;
pub mod logic;
pub mod prompt;
pub mod sources;
pub mod state;
pub mod util;
