//! # Transfer Rule Compiler
//!
//! Compiles rule specification documents into transfer rule files and
//! merges them into an existing file without losing hand-written content.
//!
//! - [`xml`] - mutable XML tree over `quick-xml`
//! - [`document`] / [`merger`] - transfer document model, load and write
//! - [`naming`] - collision-free identifiers per section
//! - [`attributes`] - attribute and category definitions with dedup
//! - [`parser`] - rule specification reader
//! - [`permutation`] - optional-word expansion
//! - [`compiler`] - pattern and action generation
//! - [`macros`] - generated macros and variables
//! - [`usage`] - reference tracking and trimming
//! - [`generator`] - the session tying it together
//!
//! ## Example
//!
//! ```ignore
//! let mut generator = RuleGenerator::new(source_db, target_db);
//! generator.load_existing_transfer_file("transfer_rules.t1x")?;
//! generator.process_spec_file("rules.xml")?;
//! generator.trim_unused();
//! generator.write_transfer_file("transfer_rules.t1x")?;
//! ```

pub mod action;
pub mod attributes;
pub mod compiler;
pub mod config;
pub mod document;
pub mod generator;
pub mod issues;
pub mod macros;
pub mod merger;
pub mod naming;
pub mod parser;
pub mod permutation;
pub mod report;
pub mod usage;
pub mod xml;

pub use attributes::AttributeRegistry;
pub use compiler::PatternCompiler;
pub use config::GeneratorConfig;
pub use document::TransferDocument;
pub use generator::RuleGenerator;
pub use issues::{CompileIssue, Phrase};
pub use macros::MacroCache;
pub use naming::NameAllocator;
pub use parser::{ParsedRule, SpecDocument, SpecificationParser};
pub use report::{CompileReport, ReportEntry, ReportSummary};
pub use usage::{TrimSummary, UsageTracker, trim_unused};
pub use xml::{Element, Node};
