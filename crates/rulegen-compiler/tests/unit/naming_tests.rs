//! Name allocation tests

use rulegen_compiler::{NameAllocator, TransferDocument};
use rulegen_domain::SectionKind;

#[test]
fn test_get_available_id_suffixes_on_collision() {
    let mut names = NameAllocator::new();
    assert_eq!(names.get_available_id(SectionKind::Rules, "x"), "x");
    assert_eq!(names.get_available_id(SectionKind::Rules, "x"), "x1");
    assert_eq!(names.get_available_id(SectionKind::Rules, "x"), "x2");
}

#[test]
fn test_get_available_id_replaces_spaces() {
    let mut names = NameAllocator::new();
    assert_eq!(
        names.get_available_id(SectionKind::Rules, "Det Adj N"),
        "Det_Adj_N"
    );
    assert_eq!(
        names.get_available_id(SectionKind::Rules, "Det_Adj_N"),
        "Det_Adj_N1"
    );
}

#[test]
fn test_namespaces_are_per_section() {
    let mut names = NameAllocator::new();
    assert_eq!(names.get_available_id(SectionKind::Variables, "v_a"), "v_a");
    assert_eq!(names.get_available_id(SectionKind::Macros, "v_a"), "v_a");
    assert_eq!(names.get_available_id(SectionKind::Variables, "v_a"), "v_a1");
}

#[test]
fn test_release_makes_name_available_again() {
    let mut names = NameAllocator::new();
    names.reserve(SectionKind::Rules, "NP");
    names.release(SectionKind::Rules, "NP");
    assert_eq!(names.get_available_id(SectionKind::Rules, "NP"), "NP");
}

#[test]
fn test_from_document_reserves_existing_names() {
    let doc = TransferDocument::parse(
        r#"<transfer>
             <section-def-cats><def-cat n="c_n"/></section-def-cats>
             <section-rules><rule comment="NP"/><rule comment="NP1"/></section-rules>
           </transfer>"#,
        "existing",
    )
    .unwrap();
    let mut names = NameAllocator::from_document(&doc);
    assert_eq!(names.get_available_id(SectionKind::Categories, "c_n"), "c_n1");
    assert_eq!(names.get_available_id(SectionKind::Rules, "NP"), "NP2");
}
