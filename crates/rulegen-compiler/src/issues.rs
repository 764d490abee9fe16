//! Compile issues
//!
//! Recoverable problems found while compiling a specification. Rule-level
//! issues cause the affected rule to be skipped; feature-level issues only
//! drop the unresolved part. None of them abort the session.

use std::fmt;

use rulegen_domain::Severity;
use serde::Serialize;

/// Which phrase of a rule an issue refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phrase {
    Source,
    Target,
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// A recoverable problem found while compiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CompileIssue {
    /// No target word is marked as head
    MissingHead { rule: String },
    /// More than one target word is marked as head
    MultipleHeads { rule: String, count: usize },
    /// The source phrase has no words
    EmptySourcePhrase { rule: String },
    /// A word has no id attribute
    MissingWordId { rule: String, phrase: Phrase },
    /// A source word has no category
    MissingCategory { rule: String, word_id: String },
    /// Two words of one phrase share an id
    DuplicateWordId {
        rule: String,
        phrase: Phrase,
        word_id: String,
    },
    /// A target word refers to an id missing from the source phrase
    UnknownTargetWord { rule: String, word_id: String },
    /// A feature has neither a match label nor a value
    MissingFeatureValue {
        rule: String,
        word_id: String,
        label: String,
    },
    /// A ranking attribute is not a non-negative integer
    InvalidRanking {
        rule: String,
        label: String,
        value: String,
    },
    /// An affix type other than prefix or suffix
    InvalidAffixType {
        rule: String,
        word_id: String,
        value: String,
    },
    /// Two word-level features of one word share a ranking
    RankingTie {
        rule: String,
        word_id: String,
        ranking: u32,
    },
    /// Several occurrences could equally provide a match label's value
    AmbiguousBinding { rule: String, match_label: String },
    /// Too many optional words to expand into permutations
    TooManyPermutationWords {
        rule: String,
        count: usize,
        limit: usize,
    },
    /// The database knows no values for a feature
    UnresolvedFeature { category: String, label: String },
    /// The database has no form for a fixed feature value
    UnresolvedFeatureValue {
        category: String,
        label: String,
        value: String,
    },
    /// A head word-level feature that neither provides nor can be enforced
    IgnoredHeadFeature {
        rule: String,
        word_id: String,
        label: String,
    },
    /// More than one disjoint feature set was declared
    MultipleDisjointSets { count: usize },
    /// A disjoint feature set lacks a required attribute
    InvalidDisjointSet { reason: String },
}

impl CompileIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::IgnoredHeadFeature { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether the issue prevents the rule from being generated
    pub fn skips_rule(&self) -> bool {
        !matches!(
            self,
            Self::UnresolvedFeature { .. }
                | Self::UnresolvedFeatureValue { .. }
                | Self::IgnoredHeadFeature { .. }
                | Self::MultipleDisjointSets { .. }
                | Self::InvalidDisjointSet { .. }
        )
    }
}

impl fmt::Display for CompileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHead { rule } => {
                write!(f, "Rule '{rule}': no target word is marked as head")
            }
            Self::MultipleHeads { rule, count } => {
                write!(f, "Rule '{rule}': {count} target words are marked as head")
            }
            Self::EmptySourcePhrase { rule } => {
                write!(f, "Rule '{rule}': the source phrase has no words")
            }
            Self::MissingWordId { rule, phrase } => {
                write!(f, "Rule '{rule}': a {phrase} word has no id")
            }
            Self::MissingCategory { rule, word_id } => {
                write!(f, "Rule '{rule}': source word '{word_id}' has no category")
            }
            Self::DuplicateWordId {
                rule,
                phrase,
                word_id,
            } => write!(
                f,
                "Rule '{rule}': id '{word_id}' is used more than once in the {phrase} phrase"
            ),
            Self::UnknownTargetWord { rule, word_id } => write!(
                f,
                "Rule '{rule}': target word '{word_id}' has no matching source word"
            ),
            Self::MissingFeatureValue {
                rule,
                word_id,
                label,
            } => write!(
                f,
                "Rule '{rule}': feature '{label}' on word '{word_id}' has neither match nor value"
            ),
            Self::InvalidRanking { rule, label, value } => write!(
                f,
                "Rule '{rule}': feature '{label}' has invalid ranking '{value}'"
            ),
            Self::InvalidAffixType {
                rule,
                word_id,
                value,
            } => write!(
                f,
                "Rule '{rule}': affix on word '{word_id}' has unknown type '{value}'"
            ),
            Self::RankingTie {
                rule,
                word_id,
                ranking,
            } => write!(
                f,
                "Rule '{rule}': word '{word_id}' has several features with ranking {ranking}"
            ),
            Self::AmbiguousBinding { rule, match_label } => write!(
                f,
                "Rule '{rule}': match label '{match_label}' has several equally ranked sources; add a ranking"
            ),
            Self::TooManyPermutationWords { rule, count, limit } => write!(
                f,
                "Rule '{rule}': {count} optional words exceed the permutation limit of {limit}"
            ),
            Self::UnresolvedFeature { category, label } => write!(
                f,
                "Feature '{label}' of category '{category}' has no values in the database"
            ),
            Self::UnresolvedFeatureValue {
                category,
                label,
                value,
            } => write!(
                f,
                "Value '{value}' of feature '{label}' (category '{category}') has no form in the database"
            ),
            Self::IgnoredHeadFeature {
                rule,
                word_id,
                label,
            } => write!(
                f,
                "Rule '{rule}': feature '{label}' on head word '{word_id}' is not used"
            ),
            Self::MultipleDisjointSets { count } => write!(
                f,
                "{count} disjoint feature sets declared; only one is supported, disjoint features are disabled"
            ),
            Self::InvalidDisjointSet { reason } => {
                write!(f, "Invalid disjoint feature set: {reason}")
            }
        }
    }
}
