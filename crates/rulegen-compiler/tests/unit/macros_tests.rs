//! Macro cache tests

use rulegen_compiler::macros::ensure_lemma_macro;
use rulegen_compiler::{MacroCache, NameAllocator, TransferDocument, trim_unused};
use rulegen_domain::SectionKind;

use crate::test_utils::target_db;

#[test]
fn test_lemma_macro_is_cached() {
    let db = target_db();
    let mut doc = TransferDocument::new();
    let mut names = NameAllocator::new();
    let mut cache = MacroCache::new();

    let first = ensure_lemma_macro(&mut cache, "n", "gender", &db, &mut doc, &mut names).unwrap();
    let second = ensure_lemma_macro(&mut cache, "n", "gender", &db, &mut doc, &mut names).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.macro_id, "m_n_gender_from_lemma");
    assert_eq!(doc.len(SectionKind::Macros), 1);
}

#[test]
fn test_forgotten_macro_is_defined_again() {
    let db = target_db();
    let mut doc = TransferDocument::new();
    let mut names = NameAllocator::new();
    let mut cache = MacroCache::new();

    ensure_lemma_macro(&mut cache, "n", "gender", &db, &mut doc, &mut names).unwrap();
    let summary = trim_unused(&mut doc);
    assert_eq!(summary.removed_macros, vec!["m_n_gender_from_lemma"]);
    assert!(!doc.contains(SectionKind::Macros, "m_n_gender_from_lemma"));

    cache.forget(&summary.removed_macros);
    ensure_lemma_macro(&mut cache, "n", "gender", &db, &mut doc, &mut names).unwrap();
    assert!(doc.contains(SectionKind::Macros, "m_n_gender_from_lemma"));
    assert!(doc.contains(SectionKind::Variables, "v_n_gender_from_lemma"));
}
