//! Linguistic Database Port
//!
//! Read-only view of a lexical project: its category hierarchy and the
//! values, lemmas and affix glosses associated with each feature. The
//! compiler holds one instance for the source language and one for the
//! target language.

use serde::{Deserialize, Serialize};

/// A surface form (lemma or affix gloss) paired with the feature value it carries
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureForm {
    /// Lemma or gloss as it appears in the token stream
    pub form: String,
    /// Feature value, e.g. `pl`
    pub value: String,
}

impl FeatureForm {
    pub fn new(form: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            value: value.into(),
        }
    }
}

/// Linguistic metadata queried while compiling rules
///
/// Every query is infallible: an unknown category or feature yields an
/// empty result, which the compiler reports as an unresolved feature.
pub trait LinguisticDatabase {
    /// Name of the project, used in log and report messages
    fn project_name(&self) -> &str;

    /// Every grammatical category abbreviation
    fn categories(&self) -> Vec<String>;

    /// All categories below `category` in the hierarchy, at any depth
    fn subcategories(&self, category: &str) -> Vec<String>;

    /// Possible values of an inherent feature
    ///
    /// `None` asks for values that are not tied to a category.
    fn possible_feature_values(&self, category: Option<&str>, label: &str) -> Vec<String>;

    /// Lemmas of `category` paired with their value for `label`
    fn lemmas_for_feature(&self, category: &str, label: &str) -> Vec<FeatureForm>;

    /// Affix glosses for `category` paired with the value of `label` they express
    fn affix_glosses_for_feature(&self, category: &str, label: &str) -> Vec<FeatureForm>;
}
