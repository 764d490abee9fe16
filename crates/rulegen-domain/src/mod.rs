//! # Transfer Rule Generator - Domain Layer
//!
//! Core types shared by every layer of the rule generator:
//!
//! - `value_objects` - feature, macro, rule and section descriptions
//! - `ports` - contracts for the linguistic database and the report sink
//! - `error` - the error type returned by fallible operations
//! - `constants` - element names and naming prefixes of the transfer format
//!
//! The domain crate has no knowledge of XML parsing or file layout; those
//! concerns live in `rulegen-compiler` and `rulegen-infrastructure`.

/// Element names and naming prefixes
pub mod constants;
/// Error types
pub mod error;
/// Boundary contracts implemented by outer layers
pub mod ports;
/// Immutable value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{FeatureForm, LinguisticDatabase, ReportSink, Severity};
pub use value_objects::{
    AffixSpec, AffixType, DisjointFeatureSet, DisjointPairing, FeatureBinding, FeatureConstraint,
    FeatureSpec, MacroSpec, Provenance, RuleSpec, SectionKind, SourceWord, TargetWord,
    underscores,
};
