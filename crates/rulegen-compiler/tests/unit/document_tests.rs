//! Transfer document and merge tests

use rulegen_compiler::{Element, TransferDocument};
use rulegen_domain::{Provenance, SectionKind};

const EXISTING: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE transfer PUBLIC "-//XMLmind//DTD transfer//EN" "transfer.dtd">
<transfer default="chunk">
  <section-def-cats>
    <def-cat n="c_n"><cat-item tags="n"/></def-cat>
  </section-def-cats>
  <section-def-vars>
    <!-- hand-written -->
    <def-var n="v_keep"/>
  </section-def-vars>
  <section-def-vars>
    <def-var n="v_second"/>
  </section-def-vars>
  <section-rules>
    <rule comment="Mine"><pattern><pattern-item n="c_n"/></pattern><action/></rule>
  </section-rules>
  <notes>free text</notes>
</transfer>
"#;

#[test]
fn test_new_document_writes_mandatory_sections_only() {
    let doc = TransferDocument::new();
    assert!(doc.is_empty());
    assert_eq!(
        doc.retained_sections(),
        vec![SectionKind::Categories, SectionKind::Rules]
    );
    let xml = doc.to_xml_string(2);
    assert!(xml.contains("<!DOCTYPE transfer"));
    assert!(xml.contains("<section-def-cats/>"));
    assert!(xml.contains("<section-rules/>"));
    assert!(!xml.contains("section-def-attrs"));
}

#[test]
fn test_parse_marks_definitions_original() {
    let doc = TransferDocument::parse(EXISTING, "existing").unwrap();
    assert_eq!(doc.root_attributes(), &[("default".to_string(), "chunk".to_string())]);
    assert!(doc.is_original(SectionKind::Categories, "c_n"));
    assert!(doc.is_original(SectionKind::Rules, "Mine"));
    assert_eq!(
        doc.section_provenance(SectionKind::Variables),
        Some(Provenance::Original)
    );
    assert!(doc.generated_names(SectionKind::Variables).is_empty());
}

#[test]
fn test_repeated_sections_are_merged() {
    let doc = TransferDocument::parse(EXISTING, "existing").unwrap();
    assert_eq!(
        doc.definition_names(SectionKind::Variables),
        vec!["v_keep", "v_second"]
    );
    let xml = doc.to_xml_string(2);
    assert_eq!(xml.matches("<section-def-vars>").count(), 1);
}

#[test]
fn test_comments_and_unknown_elements_survive() {
    let doc = TransferDocument::parse(EXISTING, "existing").unwrap();
    let xml = doc.to_xml_string(2);
    assert!(xml.contains("<!-- hand-written -->"));
    assert!(xml.contains("<notes>free text</notes>"));
    assert!(xml.find("section-rules").unwrap() < xml.find("<notes>").unwrap());
}

#[test]
fn test_parse_rejects_wrong_root() {
    let err = TransferDocument::parse("<interchunk/>", "wrong").unwrap_err();
    assert!(err.is_structural());
    assert!(err.to_string().contains("wrong"));
}

#[test]
fn test_parse_rejects_malformed_xml() {
    let err = TransferDocument::parse("<transfer><section-rules></transfer>", "broken")
        .unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn test_add_definition_is_generated_and_written() {
    let mut doc = TransferDocument::new();
    doc.add_definition(
        SectionKind::Variables,
        Element::new("def-var").with_attr("n", "v_new"),
    );
    assert_eq!(
        doc.provenance(SectionKind::Variables, "v_new"),
        Some(Provenance::Generated)
    );
    assert_eq!(doc.generated_names(SectionKind::Variables), vec!["v_new"]);
    assert!(doc.retained_sections().contains(&SectionKind::Variables));
}

#[test]
fn test_empty_generated_section_is_dropped() {
    let mut doc = TransferDocument::new();
    doc.section_mut(SectionKind::Macros);
    assert!(doc.has_section(SectionKind::Macros));
    assert!(!doc.retained_sections().contains(&SectionKind::Macros));
}

#[test]
fn test_empty_original_section_is_kept() {
    let doc =
        TransferDocument::parse("<transfer><section-def-lists/></transfer>", "lists").unwrap();
    assert!(doc.retained_sections().contains(&SectionKind::Lists));
    assert!(doc.to_xml_string(2).contains("<section-def-lists/>"));
}

#[test]
fn test_remove_definition_returns_count() {
    let mut doc = TransferDocument::parse(EXISTING, "existing").unwrap();
    assert_eq!(doc.remove_definition(SectionKind::Rules, "Mine"), 1);
    assert_eq!(doc.remove_definition(SectionKind::Rules, "Mine"), 0);
    assert!(doc.provenance(SectionKind::Rules, "Mine").is_none());
    assert_eq!(doc.remove_definition(SectionKind::Macros, "absent"), 0);
}

#[test]
fn test_sections_written_in_canonical_order() {
    let doc = TransferDocument::parse(
        r#"<transfer>
             <section-rules/>
             <section-def-macros><def-macro n="m_x" npar="1"/></section-def-macros>
             <section-def-attrs><def-attr n="a_x"><attr-item tags="x"/></def-attr></section-def-attrs>
             <section-def-cats/>
           </transfer>"#,
        "shuffled",
    )
    .unwrap();
    let xml = doc.to_xml_string(2);
    let cats = xml.find("<section-def-cats").unwrap();
    let attrs = xml.find("<section-def-attrs").unwrap();
    let macros = xml.find("<section-def-macros").unwrap();
    let rules = xml.find("<section-rules").unwrap();
    assert!(cats < attrs && attrs < macros && macros < rules);
}

#[test]
fn test_write_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.t1x");
    let doc = TransferDocument::parse(EXISTING, "existing").unwrap();
    doc.write(&path, 4).unwrap();

    let reloaded = TransferDocument::load(&path).unwrap();
    assert_eq!(reloaded.definition_names(SectionKind::Rules), vec!["Mine"]);
    assert_eq!(reloaded.doctype(), doc.doctype());
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n    <section-def-cats>"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TransferDocument::load(dir.path().join("absent.t1x")).unwrap_err();
    assert!(matches!(err, rulegen_domain::Error::Io { .. }));
}

#[test]
fn test_comments_outside_root_survive_round_trip() {
    let text = format!(
        "<?xml version=\"1.0\"?>\n<!-- USER HEADER: do not delete -->\n{}\n<!-- trailer -->\n",
        r#"<transfer><section-def-cats/><section-rules/></transfer>"#
    );
    let doc = TransferDocument::parse(&text, "header").unwrap();
    let out = doc.to_xml_string(2);
    let header = out.find("<!-- USER HEADER: do not delete -->").unwrap();
    let root = out.find("<transfer").unwrap();
    let trailer = out.find("<!-- trailer -->").unwrap();
    assert!(header < root);
    assert!(root < trailer);

    let reparsed = TransferDocument::parse(&out, "rewritten").unwrap();
    assert_eq!(reparsed.to_xml_string(2), out);
}
