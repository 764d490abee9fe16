//! In-memory transfer document
//!
//! Sections are held by [`SectionKind`] so that writing always follows the
//! canonical order. Every named definition carries a [`Provenance`]: the
//! ones present in the loaded file are `Original`, the ones added during
//! the session are `Generated`.

use std::collections::{BTreeMap, HashMap};

use rulegen_domain::constants::{NAME_ATTR, RULE_NAME_ATTR, TRANSFER_DOCTYPE};
use rulegen_domain::{Provenance, SectionKind};

use crate::xml::{Element, Node};

/// Name of a definition element within its section
pub fn definition_name(kind: SectionKind, element: &Element) -> Option<&str> {
    match kind {
        SectionKind::Rules => element.attr(RULE_NAME_ATTR),
        _ => element.attr(NAME_ATTR),
    }
}

/// A transfer file under construction
#[derive(Debug, Clone)]
pub struct TransferDocument {
    pub(crate) doctype: Option<String>,
    /// Comments and processing instructions before the root
    pub(crate) prolog: Vec<Node>,
    /// Comments and processing instructions after the root
    pub(crate) epilog: Vec<Node>,
    pub(crate) root_attributes: Vec<(String, String)>,
    pub(crate) sections: BTreeMap<SectionKind, Element>,
    /// Top-level nodes that are not sections, written after them
    pub(crate) extras: Vec<Node>,
    pub(crate) section_provenance: HashMap<SectionKind, Provenance>,
    pub(crate) provenance: HashMap<SectionKind, HashMap<String, Provenance>>,
}

impl Default for TransferDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferDocument {
    /// An empty document with the standard DOCTYPE
    pub fn new() -> Self {
        Self {
            doctype: Some(TRANSFER_DOCTYPE.to_string()),
            prolog: Vec::new(),
            epilog: Vec::new(),
            root_attributes: Vec::new(),
            sections: BTreeMap::new(),
            extras: Vec::new(),
            section_provenance: HashMap::new(),
            provenance: HashMap::new(),
        }
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    pub fn set_doctype(&mut self, doctype: Option<String>) {
        self.doctype = doctype;
    }

    pub fn root_attributes(&self) -> &[(String, String)] {
        &self.root_attributes
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Element> {
        self.sections.get(&kind)
    }

    /// The section element, created empty (as `Generated`) if missing
    pub fn section_mut(&mut self, kind: SectionKind) -> &mut Element {
        self.section_provenance
            .entry(kind)
            .or_insert(Provenance::Generated);
        self.sections
            .entry(kind)
            .or_insert_with(|| Element::new(kind.tag()))
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.sections.contains_key(&kind)
    }

    /// Provenance of a section, `None` when it does not exist
    pub fn section_provenance(&self, kind: SectionKind) -> Option<Provenance> {
        self.section_provenance.get(&kind).copied()
    }

    /// Definition elements of a section in document order
    pub fn definitions(&self, kind: SectionKind) -> impl Iterator<Item = &Element> {
        self.sections
            .get(&kind)
            .into_iter()
            .flat_map(move |section| section.children_named(kind.definition_tag()))
    }

    /// Names of the definitions of a section in document order
    pub fn definition_names(&self, kind: SectionKind) -> Vec<String> {
        self.definitions(kind)
            .filter_map(|el| definition_name(kind, el))
            .map(str::to_string)
            .collect()
    }

    /// First definition with the given name
    pub fn definition(&self, kind: SectionKind, name: &str) -> Option<&Element> {
        self.definitions(kind)
            .find(|el| definition_name(kind, el) == Some(name))
    }

    pub fn definition_mut(&mut self, kind: SectionKind, name: &str) -> Option<&mut Element> {
        let tag = kind.definition_tag();
        self.sections.get_mut(&kind).and_then(|section| {
            section
                .elements_mut()
                .find(|el| el.name == tag && definition_name(kind, el) == Some(name))
        })
    }

    pub fn contains(&self, kind: SectionKind, name: &str) -> bool {
        self.definition(kind, name).is_some()
    }

    pub fn provenance(&self, kind: SectionKind, name: &str) -> Option<Provenance> {
        self.provenance
            .get(&kind)
            .and_then(|names| names.get(name))
            .copied()
    }

    pub fn is_original(&self, kind: SectionKind, name: &str) -> bool {
        self.provenance(kind, name) == Some(Provenance::Original)
    }

    /// Names of the definitions added during this session
    pub fn generated_names(&self, kind: SectionKind) -> Vec<String> {
        self.definition_names(kind)
            .into_iter()
            .filter(|name| self.provenance(kind, name) == Some(Provenance::Generated))
            .collect()
    }

    /// Append a new definition to its section and mark it `Generated`
    pub fn add_definition(&mut self, kind: SectionKind, element: Element) {
        if let Some(name) = definition_name(kind, &element) {
            self.provenance
                .entry(kind)
                .or_default()
                .entry(name.to_string())
                .or_insert(Provenance::Generated);
        }
        self.section_mut(kind).push(element);
    }

    /// Remove every definition with the given name; returns how many were removed
    pub fn remove_definition(&mut self, kind: SectionKind, name: &str) -> usize {
        let Some(section) = self.sections.get_mut(&kind) else {
            return 0;
        };
        let before = section.children.len();
        let tag = kind.definition_tag();
        section.retain_elements(|el| el.name != tag || definition_name(kind, el) != Some(name));
        let removed = before - section.children.len();
        if removed > 0
            && let Some(names) = self.provenance.get_mut(&kind)
        {
            names.remove(name);
        }
        removed
    }

    /// Record provenance for definitions found while loading
    pub(crate) fn mark_original(&mut self, kind: SectionKind, name: &str) {
        self.provenance
            .entry(kind)
            .or_default()
            .insert(name.to_string(), Provenance::Original);
    }

    /// Number of definitions in a section
    pub fn len(&self, kind: SectionKind) -> usize {
        self.definitions(kind).count()
    }

    /// Whether the document holds no definitions at all
    pub fn is_empty(&self) -> bool {
        SectionKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }
}
