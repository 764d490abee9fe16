//! Generator settings

use rulegen_domain::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest accepted indentation width
pub const MAX_INDENT: usize = 8;

/// Largest accepted number of optional words in a permutation rule
pub const MAX_PERMUTATION_WORDS_LIMIT: usize = 16;

/// Settings of one generator session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Spaces per indentation level in the written file
    pub indent: usize,
    /// Optional words allowed in a rule that requests permutations
    pub max_permutation_words: usize,
    /// Write the transfer DOCTYPE into files that do not have one yet
    pub doctype: bool,
    /// Permutation default for documents and rules that do not say
    pub create_permutations: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            max_permutation_words: 10,
            doctype: true,
            create_permutations: false,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.indent > MAX_INDENT {
            return Err(Error::config(format!(
                "generator.indent must be at most {MAX_INDENT}, got {}",
                self.indent
            )));
        }
        if self.max_permutation_words == 0
            || self.max_permutation_words > MAX_PERMUTATION_WORDS_LIMIT
        {
            return Err(Error::config(format!(
                "generator.max_permutation_words must be between 1 and {MAX_PERMUTATION_WORDS_LIMIT}, got {}",
                self.max_permutation_words
            )));
        }
        Ok(())
    }
}
