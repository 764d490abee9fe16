//! In-memory linguistic database
//!
//! The serialized form is the database file format:
//!
//! ```json
//! { "project_name": "Target",
//!   "categories": { "n": null, "prop": "n" },
//!   "features": { "": { "gender": { "values": ["f", "m"] } },
//!                 "n": { "number": { "affixes": [["PL", "pl"]] } } } }
//! ```
//!
//! Features under the empty category apply to every category.

use std::collections::{BTreeMap, BTreeSet};

use rulegen_domain::{Error, FeatureForm, LinguisticDatabase, Result};
use serde::{Deserialize, Serialize};

/// What the database knows about one feature of one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureEntry {
    /// Inherent values
    pub values: Vec<String>,
    /// (lemma, value) pairs
    pub lemmas: Vec<(String, String)>,
    /// (gloss, value) pairs
    pub affixes: Vec<(String, String)>,
}

/// Category hierarchy and feature metadata held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryDatabase {
    pub project_name: String,
    /// Category to parent category
    #[serde(default)]
    pub categories: BTreeMap<String, Option<String>>,
    /// Category (empty for any) to feature label to entry
    #[serde(default)]
    pub features: BTreeMap<String, BTreeMap<String, FeatureEntry>>,
}

impl InMemoryDatabase {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Add a category below `parent`
    pub fn with_category(mut self, category: &str, parent: Option<&str>) -> Self {
        self.categories
            .insert(category.to_string(), parent.map(str::to_string));
        self
    }

    /// Add inherent values; an empty category applies to every category
    pub fn with_values(mut self, category: &str, label: &str, values: &[&str]) -> Self {
        self.entry(category, label)
            .values
            .extend(values.iter().map(|v| (*v).to_string()));
        self
    }

    /// Add (lemma, value) pairs
    pub fn with_lemmas(mut self, category: &str, label: &str, pairs: &[(&str, &str)]) -> Self {
        self.entry(category, label).lemmas.extend(owned(pairs));
        self
    }

    /// Add (gloss, value) pairs
    pub fn with_affixes(mut self, category: &str, label: &str, pairs: &[(&str, &str)]) -> Self {
        self.entry(category, label).affixes.extend(owned(pairs));
        self
    }

    fn entry(&mut self, category: &str, label: &str) -> &mut FeatureEntry {
        self.features
            .entry(category.to_string())
            .or_default()
            .entry(label.to_string())
            .or_default()
    }

    fn lookup(&self, category: &str, label: &str) -> Option<&FeatureEntry> {
        self.features.get(category).and_then(|f| f.get(label))
    }

    /// Check that parents and feature categories are known categories
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(Error::database("project_name must not be empty"));
        }
        for (category, parent) in &self.categories {
            if let Some(parent) = parent
                && !self.categories.contains_key(parent)
            {
                return Err(Error::database(format!(
                    "category '{category}' has unknown parent '{parent}'"
                )));
            }
        }
        for category in self.features.keys() {
            if !category.is_empty() && !self.categories.contains_key(category) {
                return Err(Error::database(format!(
                    "features listed for unknown category '{category}'"
                )));
            }
        }
        Ok(())
    }
}

fn owned<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Iterator<Item = (String, String)> + 'a {
    pairs
        .iter()
        .map(|(form, value)| ((*form).to_string(), (*value).to_string()))
}

fn forms(pairs: &[(String, String)]) -> Vec<FeatureForm> {
    pairs
        .iter()
        .map(|(form, value)| FeatureForm::new(form, value))
        .collect()
}

impl LinguisticDatabase for InMemoryDatabase {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    fn subcategories(&self, category: &str) -> Vec<String> {
        let mut seen = BTreeSet::from([category.to_string()]);
        let mut found = Vec::new();
        let mut frontier = vec![category.to_string()];
        while let Some(current) = frontier.pop() {
            for (child, parent) in &self.categories {
                if parent.as_deref() == Some(current.as_str()) && seen.insert(child.clone()) {
                    found.push(child.clone());
                    frontier.push(child.clone());
                }
            }
        }
        found
    }

    fn possible_feature_values(&self, category: Option<&str>, label: &str) -> Vec<String> {
        self.lookup(category.unwrap_or_default(), label)
            .map(|entry| entry.values.clone())
            .unwrap_or_default()
    }

    fn lemmas_for_feature(&self, category: &str, label: &str) -> Vec<FeatureForm> {
        self.lookup(category, label)
            .map(|entry| forms(&entry.lemmas))
            .unwrap_or_default()
    }

    fn affix_glosses_for_feature(&self, category: &str, label: &str) -> Vec<FeatureForm> {
        self.lookup(category, label)
            .map(|entry| forms(&entry.affixes))
            .unwrap_or_default()
    }
}
