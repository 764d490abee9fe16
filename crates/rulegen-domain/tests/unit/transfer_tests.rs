//! Section kind tests

use rulegen_domain::SectionKind;

#[test]
fn test_canonical_order() {
    let tags: Vec<&str> = SectionKind::ALL.iter().map(|k| k.tag()).collect();
    assert_eq!(
        tags,
        vec![
            "section-def-cats",
            "section-def-attrs",
            "section-def-vars",
            "section-def-lists",
            "section-def-macros",
            "section-rules",
        ]
    );
    let mut sorted = SectionKind::ALL;
    sorted.reverse();
    sorted.sort();
    assert_eq!(sorted, SectionKind::ALL);
}

#[test]
fn test_from_tag_round_trips() {
    for kind in SectionKind::ALL {
        assert_eq!(SectionKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(SectionKind::from_tag("section-unknown"), None);
}

#[test]
fn test_definition_tags() {
    assert_eq!(SectionKind::Rules.definition_tag(), "rule");
    assert_eq!(SectionKind::Macros.definition_tag(), "def-macro");
    assert_eq!(SectionKind::Categories.to_string(), "section-def-cats");
}

#[test]
fn test_mandatory_sections() {
    let mandatory: Vec<SectionKind> = SectionKind::ALL
        .into_iter()
        .filter(|k| k.is_mandatory())
        .collect();
    assert_eq!(mandatory, vec![SectionKind::Categories, SectionKind::Rules]);
}
