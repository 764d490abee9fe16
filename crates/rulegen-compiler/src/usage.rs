//! Usage tracking and trimming
//!
//! Roots are every rule and every `Original` macro. Macros reached through
//! `call-macro` are scanned in turn, so a macro used only by another macro
//! still counts as used. Only `Generated` variables and macros are removed.

use std::collections::BTreeSet;

use rulegen_domain::constants::NAME_ATTR;
use rulegen_domain::SectionKind;
use serde::Serialize;
use tracing::{debug, info};

use crate::document::TransferDocument;
use crate::xml::Element;

/// Variables and macros referenced from the roots of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageTracker {
    variables: BTreeSet<String>,
    macros: BTreeSet<String>,
}

impl UsageTracker {
    /// Scan a document for references
    pub fn scan(document: &TransferDocument) -> Self {
        let mut tracker = Self::default();
        let mut pending: Vec<String> = Vec::new();

        for rule in document.definitions(SectionKind::Rules) {
            tracker.collect(rule, &mut pending);
        }
        for def in document.definitions(SectionKind::Macros) {
            let original = def
                .attr(NAME_ATTR)
                .is_some_and(|name| document.is_original(SectionKind::Macros, name));
            if original {
                tracker.collect(def, &mut pending);
            }
        }

        let mut scanned = BTreeSet::new();
        while let Some(name) = pending.pop() {
            if !scanned.insert(name.clone()) {
                continue;
            }
            if let Some(def) = document.definition(SectionKind::Macros, &name) {
                tracker.collect(def, &mut pending);
            }
        }
        tracker
    }

    fn collect(&mut self, root: &Element, pending: &mut Vec<String>) {
        root.walk(&mut |el| {
            let Some(name) = el.attr(NAME_ATTR) else {
                return;
            };
            match el.name.as_str() {
                "var" | "append" => {
                    self.variables.insert(name.to_string());
                }
                "call-macro" => {
                    if self.macros.insert(name.to_string()) {
                        pending.push(name.to_string());
                    }
                }
                _ => {}
            }
        });
    }

    pub fn is_variable_used(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    pub fn is_macro_used(&self, name: &str) -> bool {
        self.macros.contains(name)
    }
}

/// Definitions removed by a trim pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrimSummary {
    pub removed_variables: Vec<String>,
    pub removed_macros: Vec<String>,
}

impl TrimSummary {
    pub fn total(&self) -> usize {
        self.removed_variables.len() + self.removed_macros.len()
    }
}

/// Remove `Generated` variables and macros that nothing references
pub fn trim_unused(document: &mut TransferDocument) -> TrimSummary {
    let usage = UsageTracker::scan(document);
    let mut summary = TrimSummary::default();

    for name in document.generated_names(SectionKind::Macros) {
        if !usage.is_macro_used(&name) {
            document.remove_definition(SectionKind::Macros, &name);
            debug!(name = %name, "Removed unused macro");
            summary.removed_macros.push(name);
        }
    }
    for name in document.generated_names(SectionKind::Variables) {
        if !usage.is_variable_used(&name) {
            document.remove_definition(SectionKind::Variables, &name);
            debug!(variable = %name, "Removed unused variable");
            summary.removed_variables.push(name);
        }
    }

    info!(
        variables = summary.removed_variables.len(),
        macros = summary.removed_macros.len(),
        "Trimmed unused definitions"
    );
    summary
}
