//! Attribute and category definitions
//!
//! Attributes are keyed by their value set: asking for a value set that is
//! already defined returns the existing name instead of a new definition.
//! Resolved feature lookups are cached per [`FeatureSpec::attribute_key`].

use std::collections::{BTreeSet, HashMap};

use rulegen_domain::constants::{ATTRIBUTE_PREFIX, CATEGORY_PREFIX, GRAM_CAT_ATTRIBUTE, NAME_ATTR};
use rulegen_domain::{FeatureSpec, LinguisticDatabase, SectionKind, underscores};
use tracing::debug;

use crate::document::TransferDocument;
use crate::issues::CompileIssue;
use crate::naming::NameAllocator;
use crate::xml::Element;

type AttributeKey = (String, String, bool, bool);

/// Value sets of defined attributes plus the feature-to-attribute cache
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    /// Defined attributes in creation order
    value_sets: Vec<(String, BTreeSet<String>)>,
    resolved: HashMap<AttributeKey, String>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with every `def-attr` of a loaded document
    pub fn from_document(document: &TransferDocument) -> Self {
        let mut registry = Self::new();
        for def in document.definitions(SectionKind::Attributes) {
            let Some(name) = def.attr(NAME_ATTR) else {
                continue;
            };
            registry
                .value_sets
                .push((name.to_string(), attribute_items(def)));
        }
        registry
    }

    /// Value set of a defined attribute
    pub fn values(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.value_sets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values)
    }

    /// Name of the first attribute defined with exactly these values
    pub fn find_by_values(&self, values: &BTreeSet<String>) -> Option<&str> {
        self.value_sets
            .iter()
            .find(|(_, v)| v == values)
            .map(|(n, _)| n.as_str())
    }

    /// Define an attribute for `values` unless an identical one exists
    pub fn add_single_attribute(
        &mut self,
        base: &str,
        values: BTreeSet<String>,
        document: &mut TransferDocument,
        names: &mut NameAllocator,
    ) -> String {
        if let Some(existing) = self.find_by_values(&values) {
            return existing.to_string();
        }
        let name = names.get_available_id(SectionKind::Attributes, base);
        document.add_definition(SectionKind::Attributes, attribute_element(&name, &values));
        debug!(attribute = %name, values = values.len(), "Defined attribute");
        self.value_sets.push((name.clone(), values));
        name
    }

    /// Resolve the attribute holding a feature's values, defining it if needed
    pub fn ensure_attribute(
        &mut self,
        spec: &FeatureSpec,
        db: &dyn LinguisticDatabase,
        document: &mut TransferDocument,
        names: &mut NameAllocator,
    ) -> Result<String, CompileIssue> {
        let key = spec.attribute_key();
        if let Some(name) = self.resolved.get(&key) {
            return Ok(name.clone());
        }
        let values = feature_values(spec, db);
        if values.is_empty() {
            return Err(CompileIssue::UnresolvedFeature {
                category: spec.category.clone(),
                label: spec.label.clone(),
            });
        }
        let base = format!("{ATTRIBUTE_PREFIX}{}", spec.xml_label());
        let name = self.add_single_attribute(&base, values, document, names);
        self.resolved.insert(key, name.clone());
        Ok(name)
    }

    /// Make sure the grammatical category attribute lists `categories`
    ///
    /// An existing definition is extended in place with the missing values.
    pub fn ensure_gram_cat(
        &mut self,
        categories: BTreeSet<String>,
        document: &mut TransferDocument,
        names: &mut NameAllocator,
    ) {
        let known = self.values(GRAM_CAT_ATTRIBUTE).cloned();
        match document.definition_mut(SectionKind::Attributes, GRAM_CAT_ATTRIBUTE) {
            Some(def) => {
                let mut present = attribute_items(def);
                for category in categories {
                    if present.insert(category.clone()) {
                        def.push(Element::new("attr-item").with_attr("tags", category));
                    }
                }
                self.set_values(GRAM_CAT_ATTRIBUTE, present);
            }
            None => {
                let mut values = known.unwrap_or_default();
                values.extend(categories);
                names.reserve(SectionKind::Attributes, GRAM_CAT_ATTRIBUTE);
                document.add_definition(
                    SectionKind::Attributes,
                    attribute_element(GRAM_CAT_ATTRIBUTE, &values),
                );
                self.set_values(GRAM_CAT_ATTRIBUTE, values);
            }
        }
    }

    fn set_values(&mut self, name: &str, values: BTreeSet<String>) {
        match self.value_sets.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = values,
            None => self.value_sets.push((name.to_string(), values)),
        }
    }
}

/// Values a feature can take, from the database of its side
///
/// Affix features yield their glosses; inherent features yield their values,
/// falling back to category-independent values.
pub fn feature_values(spec: &FeatureSpec, db: &dyn LinguisticDatabase) -> BTreeSet<String> {
    if spec.is_affix {
        return db
            .affix_glosses_for_feature(&spec.category, &spec.label)
            .into_iter()
            .map(|form| form.form)
            .collect();
    }
    let values = db.possible_feature_values(Some(&spec.category), &spec.label);
    if values.is_empty() {
        db.possible_feature_values(None, &spec.label)
            .into_iter()
            .collect()
    } else {
        values.into_iter().collect()
    }
}

/// Resolve the pattern category for a source word, defining it if needed
///
/// The category covers the word's subcategories. Fixed feature values
/// narrow it to tag sequences containing those values.
pub fn ensure_category(
    category: &str,
    fixed_values: &[&str],
    db: &dyn LinguisticDatabase,
    document: &mut TransferDocument,
    names: &mut NameAllocator,
) -> String {
    let mut base = format!("{CATEGORY_PREFIX}{category}");
    for value in fixed_values {
        base.push('_');
        base.push_str(value);
    }
    let name = underscores(&base);
    if document.contains(SectionKind::Categories, &name) {
        return name;
    }

    let mut covered = vec![category.to_string()];
    for sub in db.subcategories(category) {
        if !covered.contains(&sub) {
            covered.push(sub);
        }
    }

    let mut def = Element::new("def-cat").with_attr(NAME_ATTR, &name);
    for cat in &covered {
        for tags in tag_patterns(cat, fixed_values) {
            def.push(Element::new("cat-item").with_attr("tags", tags));
        }
    }
    names.reserve(SectionKind::Categories, &name);
    document.add_definition(SectionKind::Categories, def);
    debug!(category = %name, covered = covered.len(), "Defined category");
    name
}

/// Tag patterns matching `category` followed by the fixed values in order
fn tag_patterns(category: &str, fixed_values: &[&str]) -> Vec<String> {
    let mut patterns = vec![underscores(category)];
    for value in fixed_values {
        let value = underscores(value);
        patterns = patterns
            .iter()
            .flat_map(|p| [format!("{p}.{value}"), format!("{p}.*.{value}")])
            .collect();
    }
    patterns
        .iter()
        .flat_map(|p| [p.clone(), format!("{p}.*")])
        .collect()
}

fn attribute_element(name: &str, values: &BTreeSet<String>) -> Element {
    Element::new("def-attr")
        .with_attr(NAME_ATTR, name)
        .with_children(
            values
                .iter()
                .map(|v| Element::new("attr-item").with_attr("tags", v)),
        )
}

fn attribute_items(def: &Element) -> BTreeSet<String> {
    def.children_named("attr-item")
        .filter_map(|item| item.attr("tags"))
        .map(str::to_string)
        .collect()
}
