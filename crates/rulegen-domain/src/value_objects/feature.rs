//! Feature and macro value objects

use serde::{Deserialize, Serialize};

/// Replace characters that are not allowed in transfer identifiers
///
/// Spaces become underscores; nothing else is rewritten.
pub fn underscores(text: &str) -> String {
    text.trim().replace(' ', "_")
}

/// A feature that must be backed by an attribute definition
///
/// The canonical identifier is `category_label`, extended with
/// `_or_<default>` when the occurrence declares an unmarked default. Fixed
/// values and rankings belong to the occurrence itself, see
/// [`FeatureConstraint`](crate::FeatureConstraint).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Grammatical category the feature belongs to
    pub category: String,
    /// Feature name as known to the linguistic database
    pub label: String,
    /// Whether the feature is realised as an affix rather than inherently
    pub is_affix: bool,
    /// Value used when the source leaves the feature unspecified
    pub default: Option<String>,
    /// Whether values come from the source-language database
    pub is_source: bool,
}

impl FeatureSpec {
    /// Create a target-side feature without default
    pub fn new(category: impl Into<String>, label: impl Into<String>, is_affix: bool) -> Self {
        Self {
            category: category.into(),
            label: label.into(),
            is_affix,
            default: None,
            is_source: false,
        }
    }

    /// Set the unmarked default
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the feature as read from the source language
    pub fn from_source(mut self) -> Self {
        self.is_source = true;
        self
    }

    /// Canonical identifier used for generated attribute and variable names
    pub fn xml_label(&self) -> String {
        let base = format!("{}_{}", self.category, self.label);
        let label = match &self.default {
            Some(default) => format!("{base}_or_{default}"),
            None => base,
        };
        underscores(&label)
    }

    /// Key under which resolved attribute names are cached
    ///
    /// The default does not influence the value set, so it is not part of
    /// the key.
    pub fn attribute_key(&self) -> (String, String, bool, bool) {
        (
            self.category.clone(),
            self.label.clone(),
            self.is_affix,
            self.is_source,
        )
    }
}

/// Description of a generated macro body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSpec {
    /// Name of the `def-macro`
    pub macro_id: String,
    /// Variable the macro assigns
    pub variable_id: String,
    /// Categories whose lemmas the macro inspects
    pub category_sequence: Vec<String>,
}

impl MacroSpec {
    pub fn new(
        macro_id: impl Into<String>,
        variable_id: impl Into<String>,
        category_sequence: Vec<String>,
    ) -> Self {
        Self {
            macro_id: macro_id.into(),
            variable_id: variable_id.into(),
            category_sequence,
        }
    }
}
