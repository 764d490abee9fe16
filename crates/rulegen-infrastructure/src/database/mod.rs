//! Linguistic database adapters
//!
//! - [`memory`] - [`InMemoryDatabase`], built in code or deserialized
//! - [`json`] - [`JsonLinguisticDatabase`], an in-memory database loaded from a JSON file

pub mod json;
pub mod memory;

pub use json::JsonLinguisticDatabase;
pub use memory::{FeatureEntry, InMemoryDatabase};
