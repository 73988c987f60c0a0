//! CLI command handlers.

mod demo;
mod digest;

pub use demo::run_demo;
pub use digest::run_digest;
