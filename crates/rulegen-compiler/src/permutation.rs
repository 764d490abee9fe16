//! Permutation expansion
//!
//! A rule flagged for permutations becomes one rule per subset of its
//! non-head source words. The head word is in every subset. Target words
//! follow the source words they translate.

use std::collections::HashSet;

use itertools::Itertools;
use rulegen_domain::RuleSpec;

use crate::config::MAX_PERMUTATION_WORDS_LIMIT;
use crate::issues::CompileIssue;

/// Expand a rule into the concrete rules to compile
///
/// Rules without the permutation flag yield themselves. `limit` is capped
/// at [`MAX_PERMUTATION_WORDS_LIMIT`]. Otherwise the
/// subsets are produced from the full phrase down to the head alone; the
/// full phrase keeps the rule's name and each smaller subset is named after
/// the categories it keeps.
pub fn expand(rule: &RuleSpec, limit: usize) -> Result<Vec<RuleSpec>, CompileIssue> {
    if !rule.create_permutations {
        return Ok(vec![rule.clone()]);
    }

    let limit = limit.min(MAX_PERMUTATION_WORDS_LIMIT);
    let optional = rule.optional_source_ids();
    if optional.len() > limit {
        return Err(CompileIssue::TooManyPermutationWords {
            rule: rule.name.clone(),
            count: optional.len(),
            limit,
        });
    }

    let head = rule.head_target().map(|w| w.id.clone());
    let full = (1usize << optional.len()) - 1;
    let mut rules = Vec::with_capacity(full + 1);
    for mask in (0..=full).rev() {
        let included: HashSet<&str> = optional
            .iter()
            .enumerate()
            .filter(|(bit, _)| (mask >> bit) & 1 == 1)
            .map(|(_, id)| *id)
            .collect();
        let keep = |id: &str| head.as_deref() == Some(id) || included.contains(id);

        let name = if mask == full {
            rule.name.clone()
        } else {
            subset_name(rule, &keep)
        };
        rules.push(rule.retain_words(name, keep));
    }
    Ok(rules)
}

fn subset_name(rule: &RuleSpec, keep: &impl Fn(&str) -> bool) -> String {
    let categories = rule
        .source
        .iter()
        .filter(|w| keep(&w.id))
        .filter_map(|w| w.category.as_deref())
        .join(" ");
    format!("{} {categories}", rule.name)
}
