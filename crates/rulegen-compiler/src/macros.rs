//! Generated macros and variables
//!
//! Two kinds of macro are synthesized:
//!
//! - lemma macros derive a word-level feature value from a target lemma,
//!   one per (category, feature)
//! - the disjoint macro derives a split feature (e.g. a Bantu noun class)
//!   by choosing the part feature from a co-feature value, once per
//!   disjoint configuration
//!
//! Both are reused by name, so a transfer file written by an earlier run
//! keeps its macros instead of gaining numbered copies.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rulegen_domain::constants::{MACRO_PREFIX, NAME_ATTR, VARIABLE_PREFIX};
use rulegen_domain::{
    DisjointFeatureSet, FeatureForm, LinguisticDatabase, MacroSpec, SectionKind, underscores,
};
use tracing::debug;

use crate::action::{Side, any_of, assign, choose, clear, clip, equal, lit, lit_tag, var, when};
use crate::document::TransferDocument;
use crate::issues::CompileIssue;
use crate::naming::NameAllocator;
use crate::xml::Element;

/// Macros resolved during a session
#[derive(Debug, Clone, Default)]
pub struct MacroCache {
    lemma: HashMap<(String, String), MacroSpec>,
    disjoint: Option<(DisjointFeatureSet, MacroSpec)>,
}

impl MacroCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The disjoint macro, once synthesized
    pub fn disjoint_macro(&self) -> Option<&MacroSpec> {
        self.disjoint.as_ref().map(|(_, spec)| spec)
    }

    /// Drop entries whose macro definition was removed
    pub fn forget(&mut self, removed_macros: &[String]) {
        self.lemma
            .retain(|_, spec| !removed_macros.contains(&spec.macro_id));
        if self
            .disjoint
            .as_ref()
            .is_some_and(|(_, spec)| removed_macros.contains(&spec.macro_id))
        {
            self.disjoint = None;
        }
    }
}

/// Define a variable unless one with that name exists
///
/// Returns whether a definition was added.
pub fn ensure_variable(
    document: &mut TransferDocument,
    names: &mut NameAllocator,
    name: &str,
    comment: Option<&str>,
) -> bool {
    if document.contains(SectionKind::Variables, name) {
        return false;
    }
    let mut def = Element::new("def-var").with_attr(NAME_ATTR, name);
    if let Some(comment) = comment {
        def.set_attr("c", comment);
    }
    names.reserve(SectionKind::Variables, name);
    document.add_definition(SectionKind::Variables, def);
    debug!(variable = name, "Defined variable");
    true
}

/// Macro and variable names of the lemma macro for a feature
pub fn lemma_macro_names(category: &str, label: &str) -> (String, String) {
    let stem = underscores(&format!("{category}_{label}_from_lemma"));
    (
        format!("{MACRO_PREFIX}{stem}"),
        format!("{VARIABLE_PREFIX}{stem}"),
    )
}

/// Macro name, result variable and co-feature variable of a disjoint set
pub fn disjoint_names(set: &DisjointFeatureSet) -> (String, String, String) {
    let stem = underscores(&set.disjoint_name);
    (
        format!("{MACRO_PREFIX}{stem}_from_lemma"),
        format!("{VARIABLE_PREFIX}{stem}_from_lemma"),
        underscores(&format!("{VARIABLE_PREFIX}{stem}_{}", set.co_feature)),
    )
}

/// Resolve the macro deriving `label` from the lemma of a `category` word
pub fn ensure_lemma_macro(
    cache: &mut MacroCache,
    category: &str,
    label: &str,
    db: &dyn LinguisticDatabase,
    document: &mut TransferDocument,
    names: &mut NameAllocator,
) -> Result<MacroSpec, CompileIssue> {
    let key = (category.to_string(), label.to_string());
    if let Some(spec) = cache.lemma.get(&key) {
        return Ok(spec.clone());
    }

    let (macro_id, variable_id) = lemma_macro_names(category, label);
    let spec = MacroSpec::new(macro_id, variable_id, vec![category.to_string()]);
    if !document.contains(SectionKind::Macros, &spec.macro_id) {
        let by_value = lemmas_by_value(db.lemmas_for_feature(category, label));
        if by_value.is_empty() {
            return Err(CompileIssue::UnresolvedFeature {
                category: category.to_string(),
                label: label.to_string(),
            });
        }
        let def = macro_element(
            &spec.macro_id,
            &format!("Set {} from the {category} lemma", spec.variable_id),
            value_choose(&spec.variable_id, &by_value),
        );
        names.reserve(SectionKind::Macros, &spec.macro_id);
        document.add_definition(SectionKind::Macros, def);
        debug!(name = %spec.macro_id, values = by_value.len(), "Defined lemma macro");
    }
    ensure_variable(document, names, &spec.variable_id, None);

    cache.lemma.insert(key, spec.clone());
    Ok(spec)
}

/// Resolve the single macro for a disjoint feature set
///
/// The macro reads the co-feature variable, picks the matching part
/// feature and sets the result variable from the lemma in parameter 1.
pub fn ensure_disjoint_macro(
    cache: &mut MacroCache,
    set: &DisjointFeatureSet,
    db: &dyn LinguisticDatabase,
    document: &mut TransferDocument,
    names: &mut NameAllocator,
) -> Result<MacroSpec, CompileIssue> {
    if let Some((cached, spec)) = &cache.disjoint
        && cached == set
    {
        return Ok(spec.clone());
    }

    let (base_id, variable_id, co_variable) = disjoint_names(set);
    let mut categories = BTreeSet::new();
    let mut parts = Vec::with_capacity(set.pairings.len());
    for pairing in &set.pairings {
        let mut forms = Vec::new();
        for category in db.categories() {
            let found = db.lemmas_for_feature(&category, &pairing.feature_name);
            if !found.is_empty() {
                categories.insert(category);
                forms.extend(found);
            }
        }
        parts.push((pairing.co_feature_value.as_str(), lemmas_by_value(forms)));
    }
    if parts.iter().all(|(_, by_value)| by_value.is_empty()) {
        return Err(CompileIssue::UnresolvedFeature {
            category: "*".to_string(),
            label: set.disjoint_name.clone(),
        });
    }

    // A different configuration earlier in the session keeps its macro
    let macro_id = if cache.disjoint.is_some() {
        names.get_available_id(SectionKind::Macros, &base_id)
    } else {
        base_id
    };
    let spec = MacroSpec::new(macro_id, variable_id, categories.into_iter().collect());

    if !document.contains(SectionKind::Macros, &spec.macro_id) {
        let whens = parts
            .iter()
            .map(|(co_value, by_value)| {
                let body = if by_value.is_empty() {
                    clear(&spec.variable_id)
                } else {
                    value_choose(&spec.variable_id, by_value)
                };
                when(equal(var(&co_variable), lit_tag(co_value)), vec![body])
            })
            .collect();
        let def = macro_element(
            &spec.macro_id,
            &format!(
                "Set {} by {} from the lemma",
                spec.variable_id, set.co_feature
            ),
            choose(whens, Some(vec![clear(&spec.variable_id)])),
        );
        names.reserve(SectionKind::Macros, &spec.macro_id);
        document.add_definition(SectionKind::Macros, def);
        debug!(name = %spec.macro_id, parts = parts.len(), "Defined disjoint macro");
    }
    ensure_variable(document, names, &spec.variable_id, None);
    ensure_variable(document, names, &co_variable, None);

    cache.disjoint = Some((set.clone(), spec.clone()));
    Ok(spec)
}

/// Group lemmas by feature value; a lemma listed twice keeps its first value
fn lemmas_by_value(forms: Vec<FeatureForm>) -> BTreeMap<String, BTreeSet<String>> {
    let mut seen = BTreeSet::new();
    let mut by_value: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for form in forms {
        if seen.insert(form.form.clone()) {
            by_value.entry(form.value).or_default().insert(form.form);
        }
    }
    by_value
}

fn value_choose(variable: &str, by_value: &BTreeMap<String, BTreeSet<String>>) -> Element {
    let whens = by_value
        .iter()
        .map(|(value, lemmas)| {
            let tests = lemmas
                .iter()
                .map(|lemma| equal(clip(1, Side::Target, "lem"), lit(lemma)))
                .collect();
            when(any_of(tests), vec![assign(variable, lit_tag(value))])
        })
        .collect();
    choose(whens, Some(vec![clear(variable)]))
}

fn macro_element(name: &str, comment: &str, body: Element) -> Element {
    Element::new("def-macro")
        .with_attr(NAME_ATTR, name)
        .with_attr("npar", "1")
        .with_attr("c", comment)
        .with_child(body)
}
