//! Section merge engine
//!
//! Hydrates a [`TransferDocument`] from an existing transfer file and
//! serializes it back. Loading keeps everything the user wrote; writing
//! applies the section retention policy:
//!
//! - sections loaded from the file are always written
//! - generated sections are written only when they hold a definition
//! - categories and rules are always written, even empty

use std::path::Path;

use rulegen_domain::constants::TRANSFER_ROOT;
use rulegen_domain::{Error, Provenance, Result, SectionKind};
use tracing::{debug, warn};

use crate::document::{TransferDocument, definition_name};
use crate::xml::{self, Element, Node, XmlDocument};

impl TransferDocument {
    /// Load a transfer file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Hydrate a document from transfer file text
    ///
    /// Repeated section elements are merged into the first one. Comments are
    /// kept where they were found, including those outside the root.
    pub fn parse(text: &str, document: &str) -> Result<Self> {
        let parsed = xml::parse(text, document)?;
        if parsed.root.name != TRANSFER_ROOT {
            return Err(Error::xml(
                document,
                format!(
                    "expected <{TRANSFER_ROOT}> root element, found <{}>",
                    parsed.root.name
                ),
            ));
        }

        let mut doc = Self {
            doctype: parsed.doctype,
            prolog: parsed.prolog,
            epilog: parsed.epilog,
            root_attributes: parsed.root.attributes,
            ..Self::new()
        };

        for node in parsed.root.children {
            let element = match node {
                Node::Element(element) => element,
                other => {
                    doc.extras.push(other);
                    continue;
                }
            };
            let Some(kind) = SectionKind::from_tag(&element.name) else {
                warn!(element = %element.name, "Keeping unknown top-level element");
                doc.extras.push(Node::Element(element));
                continue;
            };
            doc.absorb_section(kind, element);
        }

        debug!(
            document,
            rules = doc.len(SectionKind::Rules),
            macros = doc.len(SectionKind::Macros),
            "Loaded transfer document"
        );
        Ok(doc)
    }

    fn absorb_section(&mut self, kind: SectionKind, section: Element) {
        for el in section.children_named(kind.definition_tag()) {
            if let Some(name) = definition_name(kind, el) {
                let name = name.to_string();
                self.mark_original(kind, &name);
            }
        }
        self.section_provenance.insert(kind, Provenance::Original);
        match self.sections.get_mut(&kind) {
            Some(existing) => {
                debug!(section = %kind, "Merging repeated section");
                existing.children.extend(section.children);
            }
            None => {
                self.sections.insert(kind, section);
            }
        }
    }

    /// Sections that will be written, in canonical order
    pub fn retained_sections(&self) -> Vec<SectionKind> {
        SectionKind::ALL
            .into_iter()
            .filter(|kind| {
                if kind.is_mandatory() {
                    return true;
                }
                match self.section_provenance(*kind) {
                    Some(Provenance::Original) => true,
                    Some(Provenance::Generated) => self
                        .section(*kind)
                        .is_some_and(|section| !section.has_no_elements()),
                    None => false,
                }
            })
            .collect()
    }

    /// Build the root element as it will be written
    pub fn to_element(&self) -> Element {
        let mut root = Element::new(TRANSFER_ROOT);
        root.attributes = self.root_attributes.clone();
        for kind in self.retained_sections() {
            let section = self
                .section(kind)
                .cloned()
                .unwrap_or_else(|| Element::new(kind.tag()));
            root.push(section);
        }
        root.children.extend(self.extras.iter().cloned());
        root
    }

    /// Serialize to text
    pub fn to_xml_string(&self, indent: usize) -> String {
        let document = XmlDocument {
            doctype: self.doctype.clone(),
            prolog: self.prolog.clone(),
            root: self.to_element(),
            epilog: self.epilog.clone(),
        };
        xml::to_string(&document, indent)
    }

    /// Write the document to `path`
    pub fn write(&self, path: impl AsRef<Path>, indent: usize) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_xml_string(indent)).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), "Wrote transfer document");
        Ok(())
    }
}
