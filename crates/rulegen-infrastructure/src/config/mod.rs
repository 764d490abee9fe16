//! Configuration management
//!
//! Settings are merged from built-in defaults, a `rulegen.toml` file and
//! `RULEGEN__*` environment variables, in that order.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig};
