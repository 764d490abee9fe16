//! Rule specification parser
//!
//! Reads a `FLExTransRuleGenerator` document into [`RuleSpec`]s. Malformed
//! XML is an error; problems inside one rule are collected as
//! [`CompileIssue`]s on that rule so the remaining rules still compile.

use std::collections::HashSet;
use std::path::Path;

use rulegen_domain::constants::{SPEC_ROOT, YES};
use rulegen_domain::{
    AffixSpec, AffixType, DisjointFeatureSet, DisjointPairing, Error, FeatureBinding,
    FeatureConstraint, Result, RuleSpec, SourceWord, TargetWord,
};

use crate::issues::{CompileIssue, Phrase};
use crate::xml::{self, Element};

/// One parsed rule with the problems found in it
#[derive(Debug, Clone)]
pub struct ParsedRule {
    pub rule: RuleSpec,
    /// Rule-level permutation flag, if the rule sets one
    pub create_permutations: Option<bool>,
    pub issues: Vec<CompileIssue>,
}

impl ParsedRule {
    /// Whether no issue prevents the rule from being generated
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(CompileIssue::skips_rule)
    }
}

/// A parsed specification document
#[derive(Debug, Clone, Default)]
pub struct SpecDocument {
    /// Replace existing rules that share a name with a rule of this document
    pub overwrite_rules: bool,
    /// Document-level permutation default
    pub create_permutations: Option<bool>,
    pub disjoint_sets: Vec<DisjointFeatureSet>,
    pub rules: Vec<ParsedRule>,
    /// Problems not tied to a single rule
    pub issues: Vec<CompileIssue>,
}

impl SpecDocument {
    /// The disjoint feature set in effect
    ///
    /// Disjoint handling is disabled unless exactly one set is declared.
    pub fn disjoint_set(&self) -> Option<&DisjointFeatureSet> {
        match self.disjoint_sets.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }
}

/// Parser for rule specification documents
pub struct SpecificationParser;

impl SpecificationParser {
    pub fn parse_file(path: impl AsRef<Path>) -> Result<SpecDocument> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse_str(&text, &path.display().to_string())
    }

    pub fn parse_str(text: &str, document: &str) -> Result<SpecDocument> {
        let parsed = xml::parse(text, document)?;
        let root = parsed.root;
        if root.name != SPEC_ROOT {
            return Err(Error::xml(
                document,
                format!("expected <{SPEC_ROOT}> root element, found <{}>", root.name),
            ));
        }

        let mut spec = SpecDocument {
            overwrite_rules: flag(&root, "overwrite_rules").unwrap_or(false),
            create_permutations: flag(&root, "create_permutations"),
            ..SpecDocument::default()
        };

        if let Some(sets) = root.child("DisjointFeatureSets") {
            for set in sets.children_named("DisjointFeatureSet") {
                match parse_disjoint_set(set) {
                    Ok(parsed) => spec.disjoint_sets.push(parsed),
                    Err(issue) => spec.issues.push(issue),
                }
            }
        }
        if spec.disjoint_sets.len() > 1 {
            spec.issues.push(CompileIssue::MultipleDisjointSets {
                count: spec.disjoint_sets.len(),
            });
        }

        if let Some(rules) = root.child("FLExTransRules") {
            for (index, rule) in rules.children_named("FLExTransRule").enumerate() {
                spec.rules.push(parse_rule(rule, index));
            }
        }
        Ok(spec)
    }
}

fn flag(element: &Element, name: &str) -> Option<bool> {
    element
        .attr(name)
        .map(|value| value.trim().eq_ignore_ascii_case(YES))
}

fn non_empty<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_disjoint_set(set: &Element) -> std::result::Result<DisjointFeatureSet, CompileIssue> {
    let co_feature = non_empty(set, "co_feature_name").ok_or_else(|| {
        CompileIssue::InvalidDisjointSet {
            reason: "missing co_feature_name".to_string(),
        }
    })?;
    let disjoint_name = non_empty(set, "disjoint_name").ok_or_else(|| {
        CompileIssue::InvalidDisjointSet {
            reason: "missing disjoint_name".to_string(),
        }
    })?;

    let mut pairings = Vec::new();
    if let Some(list) = set.child("DisjointFeatureValuePairings") {
        for pairing in list.children_named("DisjointFeatureValuePairing") {
            let (Some(value), Some(feature)) = (
                non_empty(pairing, "co_feature_value"),
                non_empty(pairing, "flex_feature_name"),
            ) else {
                return Err(CompileIssue::InvalidDisjointSet {
                    reason: format!("incomplete pairing in '{disjoint_name}'"),
                });
            };
            pairings.push(DisjointPairing {
                co_feature_value: value.to_string(),
                feature_name: feature.to_string(),
            });
        }
    }
    if pairings.is_empty() {
        return Err(CompileIssue::InvalidDisjointSet {
            reason: format!("'{disjoint_name}' has no value pairings"),
        });
    }

    Ok(DisjointFeatureSet {
        co_feature: co_feature.to_string(),
        disjoint_name: disjoint_name.to_string(),
        pairings,
    })
}

fn phrase_words<'a>(rule: &'a Element, phrase: &str) -> Vec<&'a Element> {
    rule.child(phrase)
        .and_then(|p| p.child("Phrase"))
        .and_then(|p| p.child("Words"))
        .map(|words| words.children_named("Word").collect())
        .unwrap_or_default()
}

fn parse_rule(element: &Element, index: usize) -> ParsedRule {
    let name = non_empty(element, "name")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Rule {}", index + 1));
    let mut issues = Vec::new();
    let mut rule = RuleSpec::new(&name);

    let mut source_ids = HashSet::new();
    for word in phrase_words(element, "Source") {
        let Some(id) = non_empty(word, "id") else {
            issues.push(CompileIssue::MissingWordId {
                rule: name.clone(),
                phrase: Phrase::Source,
            });
            continue;
        };
        if !source_ids.insert(id.to_string()) {
            issues.push(CompileIssue::DuplicateWordId {
                rule: name.clone(),
                phrase: Phrase::Source,
                word_id: id.to_string(),
            });
            continue;
        }
        let category = non_empty(word, "category").map(str::to_string);
        if category.is_none() {
            issues.push(CompileIssue::MissingCategory {
                rule: name.clone(),
                word_id: id.to_string(),
            });
        }
        rule.source.push(SourceWord {
            id: id.to_string(),
            category,
            features: parse_features(word, &name, id, &mut issues),
        });
    }
    if rule.source.is_empty() && issues.is_empty() {
        issues.push(CompileIssue::EmptySourcePhrase { rule: name.clone() });
    }

    let mut target_ids = HashSet::new();
    for word in phrase_words(element, "Target") {
        let Some(id) = non_empty(word, "id") else {
            issues.push(CompileIssue::MissingWordId {
                rule: name.clone(),
                phrase: Phrase::Target,
            });
            continue;
        };
        if !target_ids.insert(id.to_string()) {
            issues.push(CompileIssue::DuplicateWordId {
                rule: name.clone(),
                phrase: Phrase::Target,
                word_id: id.to_string(),
            });
            continue;
        }
        if !source_ids.contains(id) {
            issues.push(CompileIssue::UnknownTargetWord {
                rule: name.clone(),
                word_id: id.to_string(),
            });
        }

        let mut target = TargetWord::new(id, flag(word, "head").unwrap_or(false));
        target.category = non_empty(word, "category").map(str::to_string);
        target.features = parse_features(word, &name, id, &mut issues);
        if let Some(affixes) = word.child("Affixes") {
            for affix in affixes.children_named("Affix") {
                let affix_type = match non_empty(affix, "type") {
                    None => AffixType::Suffix,
                    Some(raw) => match raw.parse::<AffixType>() {
                        Ok(parsed) => parsed,
                        Err(_) => {
                            issues.push(CompileIssue::InvalidAffixType {
                                rule: name.clone(),
                                word_id: id.to_string(),
                                value: raw.to_string(),
                            });
                            continue;
                        }
                    },
                };
                target.affixes.push(AffixSpec {
                    affix_type,
                    features: parse_features(affix, &name, id, &mut issues),
                });
            }
        }
        rule.target.push(target);
    }

    let heads = rule.target.iter().filter(|w| w.head).count();
    match heads {
        0 => issues.push(CompileIssue::MissingHead { rule: name.clone() }),
        1 => {}
        count => issues.push(CompileIssue::MultipleHeads {
            rule: name.clone(),
            count,
        }),
    }

    ParsedRule {
        rule,
        create_permutations: flag(element, "create_permutations"),
        issues,
    }
}

/// Features of a word or affix, accepting a `Features` wrapper or bare children
fn parse_features(
    owner: &Element,
    rule: &str,
    word_id: &str,
    issues: &mut Vec<CompileIssue>,
) -> Vec<FeatureConstraint> {
    let container = owner.child("Features").unwrap_or(owner);
    let mut features = Vec::new();
    for feature in container.children_named("Feature") {
        let label = non_empty(feature, "label").unwrap_or_default();
        let binding = match (non_empty(feature, "value"), non_empty(feature, "match")) {
            (Some(value), _) => FeatureBinding::Fixed(value.to_string()),
            (None, Some(match_label)) => FeatureBinding::Match(match_label.to_string()),
            (None, None) => {
                issues.push(CompileIssue::MissingFeatureValue {
                    rule: rule.to_string(),
                    word_id: word_id.to_string(),
                    label: label.to_string(),
                });
                continue;
            }
        };
        if label.is_empty() {
            issues.push(CompileIssue::MissingFeatureValue {
                rule: rule.to_string(),
                word_id: word_id.to_string(),
                label: String::new(),
            });
            continue;
        }

        let ranking = match non_empty(feature, "ranking") {
            None => None,
            Some(raw) => match raw.parse::<u32>() {
                Ok(ranking) => Some(ranking),
                Err(_) => {
                    issues.push(CompileIssue::InvalidRanking {
                        rule: rule.to_string(),
                        label: label.to_string(),
                        value: raw.to_string(),
                    });
                    continue;
                }
            },
        };

        features.push(FeatureConstraint {
            label: label.to_string(),
            binding,
            ranking,
            default: non_empty(feature, "unmarked_default").map(str::to_string),
        });
    }
    features
}
