//! Disjoint feature sets (Bantu noun classes)

use rulegen_compiler::{GeneratorConfig, RuleGenerator};
use rulegen_domain::SectionKind;

use crate::test_utils::FixtureDatabase;

fn swahili_source() -> FixtureDatabase {
    FixtureDatabase::new("Source")
        .category("n", None)
        .category("adj", None)
        .affixes("n", "number", &[("PL", "pl"), ("SG", "sg")])
}

fn swahili_target() -> FixtureDatabase {
    FixtureDatabase::new("Target")
        .category("n", None)
        .category("adj", None)
        .lemmas("n", "class sg", &[("mtu1.1", "1"), ("kitu1.1", "7")])
        .lemmas("n", "class pl", &[("mtu1.1", "2"), ("kitu1.1", "8")])
        .affixes(
            "adj",
            "noun class",
            &[("C1", "1"), ("C2", "2"), ("C7", "7"), ("C8", "8")],
        )
}

fn generator() -> RuleGenerator {
    RuleGenerator::new(Box::new(swahili_source()), Box::new(swahili_target()))
}

const DISJOINT_SETS: &str = r#"<DisjointFeatureSets>
    <DisjointFeatureSet co_feature_name="number" disjoint_name="noun class">
      <DisjointFeatureValuePairings>
        <DisjointFeatureValuePairing co_feature_value="sg" flex_feature_name="class sg"/>
        <DisjointFeatureValuePairing co_feature_value="pl" flex_feature_name="class pl"/>
      </DisjointFeatureValuePairings>
    </DisjointFeatureSet>
  </DisjointFeatureSets>"#;

fn class_rule(name: &str, prefix: bool) -> String {
    let affix_type = if prefix { "prefix" } else { "suffix" };
    format!(
        r#"<FLExTransRule name="{name}">
      <Source><Phrase><Words>
        <Word id="1" category="n"/>
        <Word id="2" category="adj"/>
      </Words></Phrase></Source>
      <Target><Phrase><Words>
        <Word id="1" head="yes"><Feature label="noun class" match="α"/></Word>
        <Word id="2">
          <Affixes><Affix type="{affix_type}"><Feature label="noun class" match="α"/></Affix></Affixes>
        </Word>
      </Words></Phrase></Target>
    </FLExTransRule>"#
    )
}

fn spec(sets: &str, rules: &str) -> String {
    format!(
        "<FLExTransRuleGenerator>{sets}<FLExTransRules>{rules}</FLExTransRules></FLExTransRuleGenerator>"
    )
}

#[test]
fn test_disjoint_macro_created_once() {
    let rules = format!("{}{}", class_rule("N Adj", false), class_rule("N Adj Pfx", true));
    let mut generator = generator();
    let added = generator
        .process_spec_str(&spec(DISJOINT_SETS, &rules), "bantu.xml")
        .unwrap();
    assert_eq!(added, 2);
    assert!(!generator.report().has_errors(), "{:?}", generator.report().errors());

    let doc = generator.document();
    assert_eq!(
        doc.definition_names(SectionKind::Macros),
        vec!["m_noun_class_from_lemma"]
    );
    let spec = generator.disjoint_macro().unwrap();
    assert_eq!(spec.macro_id, "m_noun_class_from_lemma");
    assert_eq!(spec.variable_id, "v_noun_class_from_lemma");
    assert_eq!(spec.category_sequence, vec!["n"]);
    assert!(doc.contains(SectionKind::Variables, "v_noun_class_number"));

    let xml = generator.to_xml_string();
    assert_eq!(xml.matches(r#"<call-macro n="m_noun_class_from_lemma">"#).count(), 2);
}

#[test]
fn test_disjoint_macro_chooses_part_by_co_feature() {
    let mut generator = generator();
    generator
        .process_spec_str(&spec(DISJOINT_SETS, &class_rule("N Adj", false)), "bantu.xml")
        .unwrap();
    let doc = generator.document();
    let def = doc
        .definition(SectionKind::Macros, "m_noun_class_from_lemma")
        .unwrap();
    assert_eq!(def.attr("npar"), Some("1"));

    let outer = def.child("choose").unwrap();
    let tests: Vec<&str> = outer
        .children_named("when")
        .filter_map(|w| w.child("test"))
        .filter_map(|t| t.child("equal"))
        .filter_map(|eq| eq.child("lit-tag"))
        .filter_map(|lit| lit.attr("v"))
        .collect();
    assert_eq!(tests, vec!["sg", "pl"]);
    assert!(outer.child("otherwise").is_some());
}

#[test]
fn test_co_feature_read_from_source_affix() {
    let mut generator = generator();
    generator
        .process_spec_str(&spec(DISJOINT_SETS, &class_rule("N Adj", false)), "bantu.xml")
        .unwrap();
    let xml = generator.to_xml_string();
    assert!(xml.contains(r#"<clip pos="1" side="sl" part="a_n_number"/>"#));
    assert!(xml.contains(r#"<var n="v_noun_class_number"/>"#));
    assert!(xml.contains(r#"<lit-tag v="C7"/>"#));
}

#[test]
fn test_two_disjoint_sets_disable_disjoint_handling() {
    let sets = DISJOINT_SETS.replace(
        "</DisjointFeatureSets>",
        r#"<DisjointFeatureSet co_feature_name="person" disjoint_name="agreement">
             <DisjointFeatureValuePairings>
               <DisjointFeatureValuePairing co_feature_value="1" flex_feature_name="agr 1"/>
             </DisjointFeatureValuePairings>
           </DisjointFeatureSet>
         </DisjointFeatureSets>"#,
    );
    let mut generator = generator();
    generator
        .process_spec_str(&spec(&sets, &class_rule("N Adj", false)), "two.xml")
        .unwrap();
    assert!(generator.disjoint_macro().is_none());
    assert!(
        generator
            .report()
            .errors()
            .iter()
            .any(|e| e.contains("2 disjoint feature sets"))
    );
}

#[test]
fn test_disjoint_macro_reused_from_loaded_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bantu.t1x");
    let text = spec(DISJOINT_SETS, &class_rule("N Adj", false));

    let mut first = generator();
    first.process_spec_str(&text, "bantu.xml").unwrap();
    first.write_transfer_file(&path).unwrap();

    let mut second = RuleGenerator::with_report(
        Box::new(swahili_source()),
        Box::new(swahili_target()),
        rulegen_compiler::CompileReport::new(),
        GeneratorConfig::default(),
    );
    second.load_existing_transfer_file(&path).unwrap();
    second.process_spec_str(&text, "bantu.xml").unwrap();
    assert_eq!(
        second.document().definition_names(SectionKind::Macros),
        vec!["m_noun_class_from_lemma"]
    );
    assert_eq!(second.rule_names(), vec!["N_Adj", "N_Adj1"]);
}
