//! Pattern compiler
//!
//! Turns one concrete [`RuleSpec`] into a `rule` element. The pattern side
//! gets one `pattern-item` per source word. The action side resolves each
//! match label once into a binding variable, then lets every consumer read
//! that variable: affixes pick their gloss, non-head words pick their lemma.
//!
//! Provider order for a match label:
//!
//! 1. source-word features (value read from the source tags)
//! 2. the head target word (lemma macro, or its own source affix)
//! 3. other target occurrences by ranking, lower first
//!
//! Rule-level problems are returned before anything is added to the
//! document. Unresolved features are reported and skipped.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use itertools::Itertools;
use rulegen_domain::constants::{GRAM_CAT_ATTRIBUTE, VARIABLE_PREFIX};
use rulegen_domain::{
    AffixType, DisjointFeatureSet, FeatureBinding, FeatureConstraint, FeatureSpec,
    LinguisticDatabase, ReportSink, RuleSpec, underscores,
};

use crate::action::{
    Side, all_of, any_of, assign, blank, call_macro, choose, clear, clip, equal, lit, lit_tag,
    var, when,
};
use crate::attributes::{AttributeRegistry, ensure_category};
use crate::document::TransferDocument;
use crate::issues::CompileIssue;
use crate::macros::{
    MacroCache, disjoint_names, ensure_disjoint_macro, ensure_lemma_macro, ensure_variable,
};
use crate::naming::NameAllocator;
use crate::xml::Element;

/// Where a feature occurrence sits in the rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Site {
    Source,
    Word,
    Affix(usize),
}

#[derive(Debug)]
struct Occurrence<'r> {
    word_id: &'r str,
    /// One-based pattern position of the word (or of its source word)
    position: usize,
    /// Category for database lookups on the occurrence's own side
    category: &'r str,
    /// Category of the source word at `position`
    source_category: &'r str,
    head: bool,
    site: Site,
    target_index: Option<usize>,
    feature: &'r FeatureConstraint,
}

impl Occurrence<'_> {
    /// Whether the occurrence reads a binding to produce output
    fn is_consumer(&self) -> bool {
        match self.site {
            Site::Source => false,
            Site::Word => !self.head,
            Site::Affix(_) => true,
        }
    }
}

/// A resolved match label
#[derive(Debug, Clone)]
struct Bound {
    variable: String,
    feature: String,
    default: Option<String>,
}

/// A value a consumer compares against
#[derive(Debug, Clone)]
enum Operand {
    Var(String),
    Fixed(String),
}

/// Per-rule scratch state
#[derive(Debug, Default)]
struct RuleScope {
    claimed: HashSet<String>,
    statements: Vec<Element>,
}

impl RuleScope {
    /// Claim a variable name for this rule, suffixing the position on reuse
    fn claim(&mut self, base: String, position: usize) -> String {
        if self.claimed.insert(base.clone()) {
            return base;
        }
        let mut candidate = format!("{base}_{position}");
        let mut n = 1;
        while !self.claimed.insert(candidate.clone()) {
            candidate = format!("{base}_{position}_{n}");
            n += 1;
        }
        candidate
    }
}

/// Compiles rules into a transfer document
pub struct PatternCompiler<'a> {
    pub(crate) document: &'a mut TransferDocument,
    pub(crate) names: &'a mut NameAllocator,
    pub(crate) attributes: &'a mut AttributeRegistry,
    pub(crate) macros: &'a mut MacroCache,
    pub(crate) source_db: &'a dyn LinguisticDatabase,
    pub(crate) target_db: &'a dyn LinguisticDatabase,
    pub(crate) disjoint: Option<&'a DisjointFeatureSet>,
    pub(crate) report: &'a mut dyn ReportSink,
}

impl PatternCompiler<'_> {
    /// Compile one rule into an unnamed `rule` element
    pub fn compile(&mut self, rule: &RuleSpec) -> Result<Element, CompileIssue> {
        check_rankings(rule)?;
        let occurrences = collect_occurrences(rule);
        let providers = resolve_providers(&rule.name, &occurrences)?;

        let pattern = self.build_pattern(rule);
        let mut scope = RuleScope::default();

        for (index, occ) in occurrences.iter().enumerate() {
            let provides = providers.iter().any(|(_, p)| *p == index);
            if occ.head && occ.site == Site::Word && !provides {
                self.report_issue(&CompileIssue::IgnoredHeadFeature {
                    rule: rule.name.clone(),
                    word_id: occ.word_id.to_string(),
                    label: occ.feature.label.clone(),
                });
            }
        }

        let bindings = self.bind_labels(&occurrences, &providers, &mut scope);

        let mut out = Element::new("out");
        let mut uses_gram_cat = false;
        for (index, word) in rule.target.iter().enumerate() {
            let Some(position) = rule.source_position(&word.id) else {
                continue;
            };
            let source_category = rule
                .source_word(&word.id)
                .and_then(|w| w.category.as_deref())
                .unwrap_or_default();
            let category = word.category.as_deref().unwrap_or(source_category);

            let word_occurrences: Vec<(usize, &Occurrence)> = occurrences
                .iter()
                .enumerate()
                .filter(|(_, occ)| occ.target_index == Some(index))
                .collect();

            let lemma = if word.head {
                None
            } else {
                let consumers: Vec<&Occurrence> = word_occurrences
                    .iter()
                    .filter(|(i, occ)| {
                        occ.site == Site::Word && !providers.iter().any(|(_, p)| p == i)
                    })
                    .map(|(_, occ)| *occ)
                    .collect();
                self.select_lemma(&consumers, position, category, &bindings, &mut scope)
            };

            let mut prefixes = Vec::new();
            let mut suffixes = Vec::new();
            for (affix_index, affix) in word.affixes.iter().enumerate() {
                let affix_occurrences: Vec<&Occurrence> = word_occurrences
                    .iter()
                    .filter(|(_, occ)| occ.site == Site::Affix(affix_index))
                    .map(|(_, occ)| *occ)
                    .collect();
                let Some(output) = self.emit_affix(
                    &affix_occurrences,
                    position,
                    category,
                    &bindings,
                    &mut scope,
                ) else {
                    continue;
                };
                match affix.affix_type {
                    AffixType::Prefix => prefixes.push(output),
                    AffixType::Suffix => suffixes.push(output),
                }
            }

            let mut lu = Element::new("lu");
            lu.push(lemma.unwrap_or_else(|| clip(position, Side::Target, "lem")));
            if word.head && word.affixes.is_empty() && word.category.is_none() {
                lu.push(clip(position, Side::Target, "tags"));
            } else {
                match &word.category {
                    Some(category) => lu.push(lit_tag(category)),
                    None => {
                        uses_gram_cat = true;
                        lu.push(clip(position, Side::Target, GRAM_CAT_ATTRIBUTE));
                    }
                }
                for element in prefixes.into_iter().chain(suffixes) {
                    lu.push(element);
                }
            }

            if index > 0 {
                out.push(blank(index));
            }
            out.push(lu);
        }

        if uses_gram_cat {
            self.ensure_gram_cat(rule);
        }

        let mut action = Element::new("action").with_children(scope.statements);
        action.push(out);
        Ok(Element::new("rule").with_child(pattern).with_child(action))
    }

    fn report_issue(&mut self, issue: &CompileIssue) {
        self.report.record(issue.severity(), &issue.to_string());
    }

    fn build_pattern(&mut self, rule: &RuleSpec) -> Element {
        let mut pattern = Element::new("pattern");
        for word in &rule.source {
            let category = word.category.as_deref().unwrap_or_default();
            let name = ensure_category(
                category,
                &word.fixed_values(),
                self.source_db,
                self.document,
                self.names,
            );
            pattern.push(Element::new("pattern-item").with_attr("n", name));
        }
        pattern
    }

    fn ensure_gram_cat(&mut self, rule: &RuleSpec) {
        let mut categories: BTreeSet<String> = self.source_db.categories().into_iter().collect();
        categories.extend(self.target_db.categories());
        categories.extend(rule.source.iter().filter_map(|w| w.category.clone()));
        categories.extend(rule.target.iter().filter_map(|w| w.category.clone()));
        self.attributes
            .ensure_gram_cat(categories, self.document, self.names);
    }

    /// Emit the provider statements of every match label that has a consumer
    fn bind_labels(
        &mut self,
        occurrences: &[Occurrence],
        providers: &[(String, usize)],
        scope: &mut RuleScope,
    ) -> HashMap<String, Bound> {
        let is_disjoint = |occ: &Occurrence| {
            occ.site == Site::Word
                && self
                    .disjoint
                    .is_some_and(|set| set.disjoint_name == occ.feature.label)
        };
        let (disjoint, plain): (Vec<&(String, usize)>, Vec<&(String, usize)>) = providers
            .iter()
            .partition(|(_, index)| is_disjoint(&occurrences[*index]));

        let mut bindings = HashMap::new();
        for (label, index) in plain.into_iter().chain(disjoint) {
            let consumed = occurrences.iter().any(|occ| {
                occ.feature.binding.match_label() == Some(label.as_str()) && occ.is_consumer()
            });
            if !consumed {
                continue;
            }
            let occ = &occurrences[*index];
            let base = format!(
                "{VARIABLE_PREFIX}{}",
                underscores(&format!("{}_{}", occ.category, occ.feature.label))
            );
            let variable = scope.claim(base, occ.position);
            match self.emit_provider(occ, &variable, &bindings, scope) {
                Ok(()) => {
                    ensure_variable(self.document, self.names, &variable, None);
                    bindings.insert(
                        label.clone(),
                        Bound {
                            variable,
                            feature: occ.feature.label.clone(),
                            default: occ.feature.default.clone(),
                        },
                    );
                }
                Err(issue) => self.report_issue(&issue),
            }
        }
        bindings
    }

    fn emit_provider(
        &mut self,
        occ: &Occurrence,
        variable: &str,
        bindings: &HashMap<String, Bound>,
        scope: &mut RuleScope,
    ) -> Result<(), CompileIssue> {
        match occ.site {
            Site::Source => self.read_source(
                occ.position,
                occ.source_category,
                &occ.feature.label,
                variable,
                false,
                scope,
            ),
            Site::Affix(_) => self.read_source(
                occ.position,
                occ.source_category,
                &occ.feature.label,
                variable,
                true,
                scope,
            ),
            Site::Word => {
                if let Some(set) = self
                    .disjoint
                    .filter(|set| set.disjoint_name == occ.feature.label)
                {
                    return self.emit_disjoint(occ, set, variable, bindings, scope);
                }
                let spec = ensure_lemma_macro(
                    self.macros,
                    occ.category,
                    &occ.feature.label,
                    self.target_db,
                    self.document,
                    self.names,
                )?;
                scope
                    .statements
                    .push(call_macro(&spec.macro_id, &[occ.position]));
                scope
                    .statements
                    .push(assign(variable, var(&spec.variable_id)));
                Ok(())
            }
        }
    }

    /// Set `variable` from the source tags at `position`
    ///
    /// Inherent values are clipped directly; affix glosses are mapped back
    /// to the value they express.
    fn read_source(
        &mut self,
        position: usize,
        category: &str,
        label: &str,
        variable: &str,
        prefer_affix: bool,
        scope: &mut RuleScope,
    ) -> Result<(), CompileIssue> {
        let inherent = FeatureSpec::new(category, label, false).from_source();
        let affix = FeatureSpec::new(category, label, true).from_source();
        let order = if prefer_affix {
            [affix, inherent]
        } else {
            [inherent, affix]
        };

        for spec in order {
            let Ok(attribute) = self.attributes.ensure_attribute(
                &spec,
                self.source_db,
                self.document,
                self.names,
            ) else {
                continue;
            };
            if !spec.is_affix {
                scope
                    .statements
                    .push(assign(variable, clip(position, Side::Source, &attribute)));
                return Ok(());
            }

            let mut by_value: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
            for form in self.source_db.affix_glosses_for_feature(category, label) {
                by_value.entry(form.value).or_default().insert(form.form);
            }
            let whens = by_value
                .iter()
                .map(|(value, glosses)| {
                    let tests = glosses
                        .iter()
                        .map(|gloss| {
                            equal(clip(position, Side::Source, &attribute), lit_tag(gloss))
                        })
                        .collect();
                    when(any_of(tests), vec![assign(variable, lit_tag(value))])
                })
                .collect();
            scope
                .statements
                .push(choose(whens, Some(vec![clear(variable)])));
            return Ok(());
        }

        Err(CompileIssue::UnresolvedFeature {
            category: category.to_string(),
            label: label.to_string(),
        })
    }

    fn emit_disjoint(
        &mut self,
        occ: &Occurrence,
        set: &DisjointFeatureSet,
        variable: &str,
        bindings: &HashMap<String, Bound>,
        scope: &mut RuleScope,
    ) -> Result<(), CompileIssue> {
        let spec = ensure_disjoint_macro(
            self.macros,
            set,
            self.target_db,
            self.document,
            self.names,
        )?;
        let (_, _, co_variable) = disjoint_names(set);

        let co_bound = bindings
            .values()
            .filter(|bound| bound.feature == set.co_feature)
            .map(|bound| bound.variable.as_str())
            .sorted()
            .next();
        match co_bound {
            Some(bound) => scope.statements.push(assign(&co_variable, var(bound))),
            None => self.read_source(
                occ.position,
                occ.source_category,
                &set.co_feature,
                &co_variable,
                true,
                scope,
            )?,
        }
        scope
            .statements
            .push(call_macro(&spec.macro_id, &[occ.position]));
        scope
            .statements
            .push(assign(variable, var(&spec.variable_id)));
        Ok(())
    }

    /// Resolve what a consumer compares against, adding a defaulted variable if needed
    fn operand(
        &mut self,
        occ: &Occurrence,
        bindings: &HashMap<String, Bound>,
        scope: &mut RuleScope,
    ) -> Option<Operand> {
        let label = match &occ.feature.binding {
            FeatureBinding::Fixed(value) => return Some(Operand::Fixed(value.clone())),
            FeatureBinding::Match(label) => label,
        };
        let bound = bindings.get(label)?;
        let Some(default) = occ.feature.default.as_ref().or(bound.default.as_ref()) else {
            return Some(Operand::Var(bound.variable.clone()));
        };

        let name = underscores(&format!("{}_or_{default}", bound.variable));
        if scope.claimed.insert(name.clone()) {
            ensure_variable(self.document, self.names, &name, None);
            scope
                .statements
                .push(assign(&name, var(&bound.variable)));
            scope.statements.push(choose(
                vec![when(
                    equal(var(&name), lit("")),
                    vec![assign(&name, lit_tag(default))],
                )],
                None,
            ));
        }
        Some(Operand::Var(name))
    }

    /// Output for one affix: a literal gloss, or a variable set by a `choose`
    fn emit_affix(
        &mut self,
        occurrences: &[&Occurrence],
        position: usize,
        category: &str,
        bindings: &HashMap<String, Bound>,
        scope: &mut RuleScope,
    ) -> Option<Element> {
        let mut labels = Vec::new();
        let mut operands = Vec::new();
        let mut glosses: Vec<HashMap<String, String>> = Vec::new();
        for occ in occurrences {
            let forms = self
                .target_db
                .affix_glosses_for_feature(category, &occ.feature.label);
            if forms.is_empty() {
                self.report_issue(&CompileIssue::UnresolvedFeature {
                    category: category.to_string(),
                    label: occ.feature.label.clone(),
                });
                continue;
            }
            let Some(operand) = self.operand(occ, bindings, scope) else {
                continue;
            };
            let mut by_form = HashMap::new();
            for form in forms {
                by_form.entry(form.form).or_insert(form.value);
            }
            labels.push(occ.feature.label.as_str());
            operands.push(operand);
            glosses.push(by_form);
        }
        let (first, rest) = glosses.split_first()?;

        // Glosses expressing a value for every feature of the affix
        let candidates: Vec<(&String, Vec<&String>)> = first
            .iter()
            .sorted()
            .filter_map(|(form, value)| {
                let mut values = vec![value];
                for other in rest {
                    values.push(other.get(form)?);
                }
                Some((form, values))
            })
            .filter(|(_, values)| {
                operands.iter().zip(values).all(|(operand, value)| match operand {
                    Operand::Fixed(fixed) => fixed == *value,
                    Operand::Var(_) => true,
                })
            })
            .collect();

        let var_count = operands
            .iter()
            .filter(|op| matches!(op, Operand::Var(_)))
            .count();
        if candidates.is_empty() || var_count == 0 {
            return match candidates.first() {
                Some((form, _)) => Some(lit_tag(form)),
                None => {
                    self.report_issue(&CompileIssue::UnresolvedFeatureValue {
                        category: category.to_string(),
                        label: labels.join("+"),
                        value: fixed_values(&operands).join("+"),
                    });
                    None
                }
            };
        }

        let base = format!(
            "{VARIABLE_PREFIX}{}",
            underscores(&format!("{category}_{}_affix", labels.join("_")))
        );
        let variable = scope.claim(base, position);
        ensure_variable(self.document, self.names, &variable, None);

        let whens = candidates
            .iter()
            .map(|(form, values)| {
                let tests = operands
                    .iter()
                    .zip(values)
                    .filter_map(|(operand, value)| match operand {
                        Operand::Var(name) => Some(equal(var(name), lit_tag(value))),
                        Operand::Fixed(_) => None,
                    })
                    .collect();
                when(all_of(tests), vec![assign(&variable, lit_tag(form))])
            })
            .collect();
        scope
            .statements
            .push(choose(whens, Some(vec![clear(&variable)])));
        Some(var(&variable))
    }

    /// Pick the target lemma carrying the bound values of a non-head word
    ///
    /// When no lemma carries every value, features are dropped from the
    /// highest ranking number down until one matches.
    fn select_lemma(
        &mut self,
        occurrences: &[&Occurrence],
        position: usize,
        category: &str,
        bindings: &HashMap<String, Bound>,
        scope: &mut RuleScope,
    ) -> Option<Element> {
        let mut ordered = occurrences.to_vec();
        ordered.sort_by_key(|occ| (occ.feature.ranking.is_none(), occ.feature.ranking));

        let mut operands = Vec::new();
        let mut lemma_values: Vec<HashMap<String, String>> = Vec::new();
        for occ in ordered {
            let lemmas = self
                .target_db
                .lemmas_for_feature(category, &occ.feature.label);
            if lemmas.is_empty() {
                self.report_issue(&CompileIssue::UnresolvedFeature {
                    category: category.to_string(),
                    label: occ.feature.label.clone(),
                });
                continue;
            }
            let Some(operand) = self.operand(occ, bindings, scope) else {
                continue;
            };
            let mut by_lemma = HashMap::new();
            for form in lemmas {
                by_lemma.entry(form.form).or_insert(form.value);
            }
            operands.push(operand);
            lemma_values.push(by_lemma);
        }
        if operands.is_empty() {
            return None;
        }

        let all_lemmas: BTreeSet<&String> = lemma_values.iter().flat_map(|m| m.keys()).collect();
        let pick = |assignment: &[&str]| {
            (1..=assignment.len()).rev().find_map(|keep| {
                all_lemmas.iter().copied().find(|lemma| {
                    (0..keep).all(|i| {
                        lemma_values[i].get(*lemma).map(String::as_str) == Some(assignment[i])
                    })
                })
            })
        };

        let var_indices: Vec<usize> = operands
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, Operand::Var(_)))
            .map(|(i, _)| i)
            .collect();

        if var_indices.is_empty() {
            let assignment: Vec<&str> = operands
                .iter()
                .filter_map(|op| match op {
                    Operand::Fixed(value) => Some(value.as_str()),
                    Operand::Var(_) => None,
                })
                .collect();
            return match pick(&assignment) {
                Some(lemma) => Some(lit(lemma)),
                None => {
                    self.report_issue(&CompileIssue::UnresolvedFeatureValue {
                        category: category.to_string(),
                        label: "lemma".to_string(),
                        value: assignment.join("+"),
                    });
                    None
                }
            };
        }

        let domains: Vec<BTreeSet<&String>> = var_indices
            .iter()
            .map(|i| lemma_values[*i].values().collect())
            .collect();
        let selections: Vec<(Element, String)> = domains
            .iter()
            .map(|domain| domain.iter().copied())
            .multi_cartesian_product()
            .filter_map(|combo| {
                let mut chosen = combo.iter();
                let mut assignment = Vec::with_capacity(operands.len());
                for operand in &operands {
                    match operand {
                        Operand::Fixed(value) => assignment.push(value.as_str()),
                        Operand::Var(_) => assignment.push(chosen.next()?.as_str()),
                    }
                }
                let lemma = pick(&assignment)?;
                let tests = var_indices
                    .iter()
                    .zip(&combo)
                    .filter_map(|(i, value)| match &operands[*i] {
                        Operand::Var(name) => Some(equal(var(name), lit_tag(value))),
                        Operand::Fixed(_) => None,
                    })
                    .collect();
                Some((all_of(tests), lemma.clone()))
            })
            .collect();
        if selections.is_empty() {
            return None;
        }

        let base = format!(
            "{VARIABLE_PREFIX}{}",
            underscores(&format!("{category}_lemma"))
        );
        let variable = scope.claim(base, position);
        ensure_variable(self.document, self.names, &variable, None);
        let whens = selections
            .into_iter()
            .map(|(test, lemma)| when(test, vec![assign(&variable, lit(&lemma))]))
            .collect();
        scope.statements.push(choose(
            whens,
            Some(vec![assign(&variable, clip(position, Side::Target, "lem"))]),
        ));
        Some(var(&variable))
    }
}

fn fixed_values(operands: &[Operand]) -> Vec<&str> {
    operands
        .iter()
        .filter_map(|op| match op {
            Operand::Fixed(value) => Some(value.as_str()),
            Operand::Var(_) => None,
        })
        .collect()
}

/// Reject words whose word-level features share an explicit ranking
fn check_rankings(rule: &RuleSpec) -> Result<(), CompileIssue> {
    for word in &rule.target {
        let mut seen = HashSet::new();
        for ranking in word.features.iter().filter_map(|f| f.ranking) {
            if !seen.insert(ranking) {
                return Err(CompileIssue::RankingTie {
                    rule: rule.name.clone(),
                    word_id: word.id.clone(),
                    ranking,
                });
            }
        }
    }
    Ok(())
}

fn collect_occurrences(rule: &RuleSpec) -> Vec<Occurrence<'_>> {
    let head = rule.head_target().map(|w| w.id.as_str());
    let mut occurrences = Vec::new();

    for (index, word) in rule.source.iter().enumerate() {
        let category = word.category.as_deref().unwrap_or_default();
        for feature in &word.features {
            if feature.binding.match_label().is_none() {
                continue;
            }
            occurrences.push(Occurrence {
                word_id: &word.id,
                position: index + 1,
                category,
                source_category: category,
                head: head == Some(word.id.as_str()),
                site: Site::Source,
                target_index: None,
                feature,
            });
        }
    }

    for (index, word) in rule.target.iter().enumerate() {
        let Some(position) = rule.source_position(&word.id) else {
            continue;
        };
        let source_category = rule
            .source_word(&word.id)
            .and_then(|w| w.category.as_deref())
            .unwrap_or_default();
        let category = word.category.as_deref().unwrap_or(source_category);
        let sites = word
            .features
            .iter()
            .map(|feature| (Site::Word, feature))
            .chain(word.affixes.iter().enumerate().flat_map(|(affix_index, affix)| {
                affix
                    .features
                    .iter()
                    .map(move |feature| (Site::Affix(affix_index), feature))
            }));
        for (site, feature) in sites {
            occurrences.push(Occurrence {
                word_id: &word.id,
                position,
                category,
                source_category,
                head: word.head,
                site,
                target_index: Some(index),
                feature,
            });
        }
    }
    occurrences
}

/// Choose the provider occurrence of every match label, in first-seen order
fn resolve_providers(
    rule: &str,
    occurrences: &[Occurrence],
) -> Result<Vec<(String, usize)>, CompileIssue> {
    let mut labels: Vec<(&str, Vec<usize>)> = Vec::new();
    for (index, occ) in occurrences.iter().enumerate() {
        let Some(label) = occ.feature.binding.match_label() else {
            continue;
        };
        match labels.iter_mut().find(|(l, _)| *l == label) {
            Some((_, members)) => members.push(index),
            None => labels.push((label, vec![index])),
        }
    }

    labels
        .into_iter()
        .map(|(label, members)| {
            choose_provider(rule, label, occurrences, &members).map(|p| (label.to_string(), p))
        })
        .collect()
}

fn choose_provider(
    rule: &str,
    label: &str,
    occurrences: &[Occurrence],
    members: &[usize],
) -> Result<usize, CompileIssue> {
    let source: Vec<usize> = members
        .iter()
        .copied()
        .filter(|i| occurrences[*i].site == Site::Source)
        .collect();
    if !source.is_empty() {
        return pick_ranked(rule, label, occurrences, &source);
    }

    let on_head = |want: fn(Site) -> bool| {
        members
            .iter()
            .copied()
            .find(|i| occurrences[*i].head && want(occurrences[*i].site))
    };
    if let Some(index) = on_head(|site| site == Site::Word)
        .or_else(|| on_head(|site| matches!(site, Site::Affix(_))))
    {
        return Ok(index);
    }

    pick_ranked(rule, label, occurrences, members)
}

/// Lowest ranking wins; unranked counts as last. A tie goes to the head
/// word if exactly one winner sits on it, otherwise the binding is ambiguous.
fn pick_ranked(
    rule: &str,
    label: &str,
    occurrences: &[Occurrence],
    candidates: &[usize],
) -> Result<usize, CompileIssue> {
    let rank = |i: &usize| occurrences[*i].feature.ranking.unwrap_or(u32::MAX);
    let best = candidates.iter().map(rank).min().unwrap_or(u32::MAX);
    let winners: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|i| rank(i) == best)
        .collect();
    if let [single] = winners.as_slice() {
        return Ok(*single);
    }
    let on_head: Vec<usize> = winners
        .iter()
        .copied()
        .filter(|i| occurrences[*i].head)
        .collect();
    match on_head.as_slice() {
        [single] => Ok(*single),
        _ => Err(CompileIssue::AmbiguousBinding {
            rule: rule.to_string(),
            match_label: label.to_string(),
        }),
    }
}
