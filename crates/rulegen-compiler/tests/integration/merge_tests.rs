//! Merging generated rules into existing transfer files

use rulegen_domain::SectionKind;

use crate::test_utils::{NOUN_PHRASE_SPEC, USER_VARIABLE_TRANSFER, generator};

fn definition_counts(generator: &rulegen_compiler::RuleGenerator) -> Vec<usize> {
    [
        SectionKind::Categories,
        SectionKind::Attributes,
        SectionKind::Variables,
        SectionKind::Macros,
    ]
    .into_iter()
    .map(|kind| generator.document().len(kind))
    .collect()
}

#[test]
fn test_user_content_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transfer_rules.t1x");
    std::fs::write(&path, USER_VARIABLE_TRANSFER).unwrap();

    let mut generator = generator();
    generator.load_existing_transfer_file(&path).unwrap();
    generator
        .process_spec_str(NOUN_PHRASE_SPEC, "np.xml")
        .unwrap();
    generator.trim_unused();
    generator.write_transfer_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains(r#"<def-var n="v_user_variable"/>"#));
    assert!(written.contains("<!-- kept by hand -->"));
    assert!(written.contains(r#"<transfer default="chunk">"#));
    assert!(written.contains(r#"<rule comment="Adj_N">"#));
    assert!(
        written.find("v_user_variable").unwrap() < written.find(r#"n="v_n_number""#).unwrap()
    );
}

#[test]
fn test_reprocessing_same_spec_does_not_grow_definitions() {
    let mut generator = generator();
    generator
        .process_spec_str(NOUN_PHRASE_SPEC, "np.xml")
        .unwrap();
    let before = definition_counts(&generator);

    generator
        .process_spec_str(NOUN_PHRASE_SPEC, "np.xml")
        .unwrap();
    assert_eq!(definition_counts(&generator), before);
    assert_eq!(generator.rule_names(), vec!["Adj_N", "Adj_N1"]);
}

#[test]
fn test_rerun_on_written_file_does_not_grow_definitions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transfer_rules.t1x");

    let mut first = generator();
    first.process_spec_str(NOUN_PHRASE_SPEC, "np.xml").unwrap();
    first.trim_unused();
    first.write_transfer_file(&path).unwrap();
    let before = definition_counts(&first);

    let mut second = generator();
    second.load_existing_transfer_file(&path).unwrap();
    second.process_spec_str(NOUN_PHRASE_SPEC, "np.xml").unwrap();
    second.trim_unused();
    assert_eq!(definition_counts(&second), before);
    assert!(!second.report().has_errors());
}

#[test]
fn test_overwrite_replaces_rule_with_same_name() {
    let overwrite = NOUN_PHRASE_SPEC.replace(
        "<FLExTransRuleGenerator>",
        r#"<FLExTransRuleGenerator overwrite_rules="yes">"#,
    );
    let mut generator = generator();
    generator
        .process_spec_str(NOUN_PHRASE_SPEC, "np.xml")
        .unwrap();
    generator.process_spec_str(&overwrite, "np.xml").unwrap();

    assert_eq!(generator.rule_names(), vec!["Adj_N"]);
    let infos = generator
        .report()
        .messages(rulegen_domain::Severity::Info)
        .join("\n");
    assert!(infos.contains("Replacing existing rule 'Adj_N'"));
}

#[test]
fn test_overwrite_keeps_unrelated_rules() {
    let existing = r#"<transfer>
      <section-def-cats><def-cat n="c_v"><cat-item tags="v"/></def-cat></section-def-cats>
      <section-rules>
        <rule comment="Verb"><pattern><pattern-item n="c_v"/></pattern><action/></rule>
      </section-rules>
    </transfer>"#;
    let overwrite = NOUN_PHRASE_SPEC.replace(
        "<FLExTransRuleGenerator>",
        r#"<FLExTransRuleGenerator overwrite_rules="yes">"#,
    );
    let mut generator = generator();
    generator.load_transfer_str(existing, "existing").unwrap();
    generator.process_spec_str(&overwrite, "np.xml").unwrap();
    assert_eq!(generator.rule_names(), vec!["Verb", "Adj_N"]);
}

#[test]
fn test_trim_removes_generated_leftovers_only() {
    let mut generator = generator();
    generator
        .load_transfer_str(USER_VARIABLE_TRANSFER, "existing")
        .unwrap();
    let scratch = generator.add_variable("v scratch", Some("unused"));
    assert_eq!(scratch, "v_scratch");

    let summary = generator.trim_unused();
    assert_eq!(summary.removed_variables, vec!["v_scratch"]);
    assert!(
        generator
            .document()
            .contains(SectionKind::Variables, "v_user_variable")
    );
}

#[test]
fn test_invalid_existing_file_leaves_session_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.t1x");
    std::fs::write(&path, "<transfer><section-rules>").unwrap();

    let mut generator = generator();
    generator
        .process_spec_str(NOUN_PHRASE_SPEC, "np.xml")
        .unwrap();
    let err = generator.load_existing_transfer_file(&path).unwrap_err();
    assert!(err.is_structural());
    assert_eq!(generator.rule_names(), vec!["Adj_N"]);
}

#[test]
fn test_user_variable_survives_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transfer_rules.t1x");
    std::fs::write(&path, USER_VARIABLE_TRANSFER).unwrap();

    let mut generator = generator();
    generator.load_existing_transfer_file(&path).unwrap();
    let summary = generator.trim_unused();
    assert_eq!(summary.total(), 0);
    generator.write_transfer_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<section-def-vars>"));
    assert!(written.contains(r#"<def-var n="v_user_variable"/>"#));
}

#[test]
fn test_fresh_empty_session_writes_no_optional_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transfer_rules.t1x");

    let mut generator = generator();
    generator.trim_unused();
    generator.write_transfer_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<transfer"));
    assert!(!written.contains("section-def-vars"));
    assert!(!written.contains("section-def-macros"));
    assert!(!written.contains("section-def-lists"));
}

#[test]
fn test_macro_removed_by_trim_is_restored_on_reuse() {
    let failing = r#"<FLExTransRuleGenerator overwrite_rules="yes"><FLExTransRules>
      <FLExTransRule name="Adj N">
        <Source><Phrase><Words>
          <Word id="1" category="adj"/>
          <Word id="2" category="n"/>
        </Words></Phrase></Source>
        <Target><Phrase><Words>
          <Word id="1">
            <Feature label="gender" match="α" ranking="1"/>
            <Feature label="number" match="β" ranking="1"/>
          </Word>
          <Word id="2" head="yes"/>
        </Words></Phrase></Target>
      </FLExTransRule>
    </FLExTransRules></FLExTransRuleGenerator>"#;

    let mut generator = generator();
    generator
        .process_spec_str(NOUN_PHRASE_SPEC, "np.xml")
        .unwrap();
    generator.process_spec_str(failing, "tie.xml").unwrap();
    assert!(generator.rule_names().is_empty());

    let summary = generator.trim_unused();
    assert!(
        summary
            .removed_macros
            .contains(&"m_n_gender_from_lemma".to_string())
    );

    generator
        .process_spec_str(NOUN_PHRASE_SPEC, "np.xml")
        .unwrap();
    assert_eq!(generator.rule_names(), vec!["Adj_N"]);
    assert!(
        generator
            .document()
            .contains(SectionKind::Macros, "m_n_gender_from_lemma")
    );
    let xml = generator.to_xml_string();
    assert!(xml.contains(r#"<def-macro n="m_n_gender_from_lemma""#));
}
