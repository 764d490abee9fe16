//! Transfer file sections and definition provenance

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six top-level groupings of a transfer file, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    Categories,
    Attributes,
    Variables,
    Lists,
    Macros,
    Rules,
}

impl SectionKind {
    /// All kinds in the order they are written
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Categories,
        SectionKind::Attributes,
        SectionKind::Variables,
        SectionKind::Lists,
        SectionKind::Macros,
        SectionKind::Rules,
    ];

    /// Element name of the section
    pub fn tag(self) -> &'static str {
        match self {
            Self::Categories => "section-def-cats",
            Self::Attributes => "section-def-attrs",
            Self::Variables => "section-def-vars",
            Self::Lists => "section-def-lists",
            Self::Macros => "section-def-macros",
            Self::Rules => "section-rules",
        }
    }

    /// Element name of the definitions the section holds
    pub fn definition_tag(self) -> &'static str {
        match self {
            Self::Categories => "def-cat",
            Self::Attributes => "def-attr",
            Self::Variables => "def-var",
            Self::Lists => "def-list",
            Self::Macros => "def-macro",
            Self::Rules => "rule",
        }
    }

    /// Resolve a section element name
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Whether the engine requires the section even when it is empty
    pub fn is_mandatory(self) -> bool {
        matches!(self, Self::Categories | Self::Rules)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Where a section or definition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// Present in the transfer file loaded at the start of the session
    Original,
    /// Created during this session
    Generated,
}
