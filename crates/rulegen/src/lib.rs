//! # Transfer Rule Generator
//!
//! Compiles rule specification documents into Apertium structural transfer
//! files (`.t1x`), merging into an existing file without losing
//! hand-written rules, variables or macros.
//!
//! ## Example
//!
//! ```ignore
//! use rulegen::compiler::RuleGenerator;
//! use rulegen::infrastructure::JsonLinguisticDatabase;
//!
//! let source = JsonLinguisticDatabase::load("source.json")?;
//! let target = JsonLinguisticDatabase::load("target.json")?;
//! let mut generator = RuleGenerator::new(Box::new(source), Box::new(target));
//! generator.process_spec_file("rules.xml")?;
//! generator.trim_unused();
//! generator.write_transfer_file("transfer_rules.t1x")?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - value objects, errors and ports
//! - `compiler` - specification parsing, rule compilation and merging
//! - `infrastructure` - configuration, logging and database files
//! - [`cli`] - the `rulegen` command

pub mod cli;

/// Domain layer - value objects, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use rulegen_domain::*;
}

/// Compiler layer - the generator session and its parts
///
/// Re-exports from the compiler crate for convenience
pub mod compiler {
    pub use rulegen_compiler::*;
}

/// Infrastructure layer - config, logging and database adapters
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use rulegen_infrastructure::*;
}

pub use compiler::{CompileReport, GeneratorConfig, RuleGenerator};
pub use domain::{Error, LinguisticDatabase, Result};
