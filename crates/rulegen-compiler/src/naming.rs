//! Collision-free identifier allocation
//!
//! Each section kind has its own namespace. Allocation returns the base
//! name if it is free, otherwise the base with the smallest positive
//! integer suffix that is free.

use std::collections::{HashMap, HashSet};

use rulegen_domain::{SectionKind, underscores};

use crate::document::TransferDocument;

/// Tracks identifiers in use per section kind
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    used: HashMap<SectionKind, HashSet<String>>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the allocator with every definition name in a document
    pub fn from_document(document: &TransferDocument) -> Self {
        let mut allocator = Self::new();
        for kind in SectionKind::ALL {
            for name in document.definition_names(kind) {
                allocator.reserve(kind, &name);
            }
        }
        allocator
    }

    /// Allocate a free identifier derived from `base`
    ///
    /// Spaces in `base` become underscores. The returned name is reserved.
    pub fn get_available_id(&mut self, kind: SectionKind, base: &str) -> String {
        let base = underscores(base);
        let used = self.used.entry(kind).or_default();
        if used.insert(base.clone()) {
            return base;
        }
        let mut suffix = 1usize;
        loop {
            let candidate = format!("{base}{suffix}");
            if used.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Mark a name as taken
    pub fn reserve(&mut self, kind: SectionKind, name: &str) {
        self.used.entry(kind).or_default().insert(name.to_string());
    }

    /// Make a name available again
    pub fn release(&mut self, kind: SectionKind, name: &str) {
        if let Some(used) = self.used.get_mut(&kind) {
            used.remove(name);
        }
    }
}
