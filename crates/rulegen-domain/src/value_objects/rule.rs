//! Rule specification model
//!
//! A [`RuleSpec`] mirrors one rule of the specification document: an
//! ordered source phrase that becomes the match pattern and an ordered
//! target phrase that becomes the output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a feature occurrence obtains its value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureBinding {
    /// Agrees with every other occurrence carrying the same label
    Match(String),
    /// Always takes this value
    Fixed(String),
}

impl FeatureBinding {
    /// Match label, if the occurrence is bound by agreement
    pub fn match_label(&self) -> Option<&str> {
        match self {
            Self::Match(label) => Some(label),
            Self::Fixed(_) => None,
        }
    }

    /// Fixed value, if any
    pub fn fixed_value(&self) -> Option<&str> {
        match self {
            Self::Match(_) => None,
            Self::Fixed(value) => Some(value),
        }
    }
}

/// One `Feature` element of a word or affix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConstraint {
    /// Feature name
    pub label: String,
    /// Match label or fixed value
    pub binding: FeatureBinding,
    /// Priority among competing occurrences (lower wins)
    pub ranking: Option<u32>,
    /// Fallback value when the source leaves the feature unspecified
    pub default: Option<String>,
}

impl FeatureConstraint {
    /// Occurrence bound by a match label
    pub fn matching(label: impl Into<String>, match_label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            binding: FeatureBinding::Match(match_label.into()),
            ranking: None,
            default: None,
        }
    }

    /// Occurrence with a fixed value
    pub fn fixed(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            binding: FeatureBinding::Fixed(value.into()),
            ranking: None,
            default: None,
        }
    }

    pub fn with_ranking(mut self, ranking: u32) -> Self {
        self.ranking = Some(ranking);
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Position of an affix relative to the stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffixType {
    Prefix,
    Suffix,
}

impl fmt::Display for AffixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => write!(f, "prefix"),
            Self::Suffix => write!(f, "suffix"),
        }
    }
}

impl FromStr for AffixType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "suffix" => Ok(Self::Suffix),
            other => Err(format!("unknown affix type '{other}'")),
        }
    }
}

/// One declared affix of a target word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixSpec {
    pub affix_type: AffixType,
    pub features: Vec<FeatureConstraint>,
}

/// A word of the source phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceWord {
    pub id: String,
    /// Grammatical category; required, validated by the parser
    pub category: Option<String>,
    /// Features constraining or providing values from the source side
    pub features: Vec<FeatureConstraint>,
}

impl SourceWord {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: Some(category.into()),
            features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: FeatureConstraint) -> Self {
        self.features.push(feature);
        self
    }

    /// Fixed feature values, which become pattern constraints
    pub fn fixed_values(&self) -> Vec<&str> {
        self.features
            .iter()
            .filter_map(|f| f.binding.fixed_value())
            .collect()
    }
}

/// A word of the target phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetWord {
    /// Id of the source word this word translates
    pub id: String,
    pub head: bool,
    /// Category override for the output word
    pub category: Option<String>,
    /// Word-level (inherent) features
    pub features: Vec<FeatureConstraint>,
    /// Affixes in declared order
    pub affixes: Vec<AffixSpec>,
}

impl TargetWord {
    pub fn new(id: impl Into<String>, head: bool) -> Self {
        Self {
            id: id.into(),
            head,
            category: None,
            features: Vec::new(),
            affixes: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: FeatureConstraint) -> Self {
        self.features.push(feature);
        self
    }

    pub fn with_affix(mut self, affix_type: AffixType, features: Vec<FeatureConstraint>) -> Self {
        self.affixes.push(AffixSpec {
            affix_type,
            features,
        });
        self
    }
}

/// One rule of a specification document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    pub source: Vec<SourceWord>,
    pub target: Vec<TargetWord>,
    /// Expand into one rule per subset of non-head source words
    pub create_permutations: bool,
}

impl RuleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: Vec::new(),
            target: Vec::new(),
            create_permutations: false,
        }
    }

    pub fn with_source(mut self, word: SourceWord) -> Self {
        self.source.push(word);
        self
    }

    pub fn with_target(mut self, word: TargetWord) -> Self {
        self.target.push(word);
        self
    }

    /// The single target word marked as head
    pub fn head_target(&self) -> Option<&TargetWord> {
        self.target.iter().find(|w| w.head)
    }

    /// Look up a source word by id
    pub fn source_word(&self, id: &str) -> Option<&SourceWord> {
        self.source.iter().find(|w| w.id == id)
    }

    /// One-based position of a source word in the pattern
    pub fn source_position(&self, id: &str) -> Option<usize> {
        self.source.iter().position(|w| w.id == id).map(|p| p + 1)
    }

    /// Ids of source words that may be left out by permutation expansion
    pub fn optional_source_ids(&self) -> Vec<&str> {
        let head = self.head_target().map(|w| w.id.as_str());
        self.source
            .iter()
            .map(|w| w.id.as_str())
            .filter(|id| Some(*id) != head)
            .collect()
    }

    /// Copy of this rule keeping only the words whose id passes `keep`
    pub fn retain_words(&self, name: impl Into<String>, keep: impl Fn(&str) -> bool) -> Self {
        Self {
            name: name.into(),
            source: self
                .source
                .iter()
                .filter(|w| keep(&w.id))
                .cloned()
                .collect(),
            target: self
                .target
                .iter()
                .filter(|w| keep(&w.id))
                .cloned()
                .collect(),
            create_permutations: false,
        }
    }
}

/// One co-feature value and the database feature holding that part
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisjointPairing {
    pub co_feature_value: String,
    pub feature_name: String,
}

/// A feature split into mutually exclusive parts keyed by a co-feature
///
/// Bantu noun classes are the motivating case: singular and plural classes
/// are separate database features, and the number decides which applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisjointFeatureSet {
    /// Feature whose value selects the part (e.g. `number`)
    pub co_feature: String,
    /// Label used in rules for the combined feature
    pub disjoint_name: String,
    pub pairings: Vec<DisjointPairing>,
}

impl DisjointFeatureSet {
    /// Names of the part features, in declaration order
    pub fn parts(&self) -> Vec<&str> {
        self.pairings
            .iter()
            .map(|p| p.feature_name.as_str())
            .collect()
    }
}
