//! # Transfer Rule Generator - Infrastructure Layer
//!
//! Cross-cutting concerns around the compiler:
//!
//! - [`config`] - layered configuration (defaults, TOML file, environment)
//! - [`logging`] - tracing subscriber setup
//! - [`database`] - linguistic databases backed by JSON files or built in memory
//! - [`constants`] - file names, environment prefixes and logging defaults

pub mod config;
pub mod constants;
pub mod database;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, LoggingConfig};
pub use database::{InMemoryDatabase, JsonLinguisticDatabase};
pub use logging::{init_logging, parse_log_level};
