//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`FeatureSpec`] | A feature occurrence that needs an attribute definition |
//! | [`MacroSpec`] | A generated macro and the variable it sets |
//! | [`RuleSpec`] | One rule of a specification document |
//! | [`DisjointFeatureSet`] | A feature split into parts keyed by a co-feature |
//! | [`SectionKind`] | The six top-level groupings of a transfer file |
//! | [`Provenance`] | Whether a definition was loaded or generated |

/// Feature and macro descriptions
pub mod feature;
/// Rule specification model
pub mod rule;
/// Transfer file sections and provenance
pub mod transfer;

pub use feature::{FeatureSpec, MacroSpec, underscores};
pub use rule::{
    AffixSpec, AffixType, DisjointFeatureSet, DisjointPairing, FeatureBinding, FeatureConstraint,
    RuleSpec, SourceWord, TargetWord,
};
pub use transfer::{Provenance, SectionKind};
