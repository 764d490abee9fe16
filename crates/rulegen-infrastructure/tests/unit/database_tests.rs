//! Linguistic database adapters

use rulegen_domain::{FeatureForm, LinguisticDatabase};
use rulegen_infrastructure::{InMemoryDatabase, JsonLinguisticDatabase};

const TARGET_JSON: &str = r#"{
  "project_name": "French",
  "categories": { "n": null, "prop": "n", "place": "prop", "adj": null },
  "features": {
    "": { "gender": { "values": ["f", "m"] } },
    "n": {
      "gender": { "lemmas": [["maison1.1", "f"], ["livre1.1", "m"]] },
      "number": { "affixes": [["PL", "pl"], ["SG", "sg"]] }
    }
  }
}"#;

#[test]
fn test_json_database_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("target.json");
    std::fs::write(&path, TARGET_JSON).unwrap();

    let db = JsonLinguisticDatabase::load(&path).unwrap();
    assert_eq!(db.path(), path.as_path());
    assert_eq!(db.project_name(), "French");
    assert_eq!(db.categories(), vec!["adj", "n", "place", "prop"]);
    assert_eq!(
        db.lemmas_for_feature("n", "gender"),
        vec![
            FeatureForm::new("maison1.1", "f"),
            FeatureForm::new("livre1.1", "m")
        ]
    );
    assert_eq!(
        db.affix_glosses_for_feature("n", "number")[0],
        FeatureForm::new("PL", "pl")
    );
}

#[test]
fn test_subcategories_are_transitive() {
    let db: InMemoryDatabase = serde_json::from_str(TARGET_JSON).unwrap();
    let mut subs = db.subcategories("n");
    subs.sort();
    assert_eq!(subs, vec!["place", "prop"]);
    assert!(db.subcategories("adj").is_empty());
}

#[test]
fn test_category_independent_values() {
    let db: InMemoryDatabase = serde_json::from_str(TARGET_JSON).unwrap();
    assert_eq!(db.possible_feature_values(None, "gender"), vec!["f", "m"]);
    assert!(db.possible_feature_values(Some("n"), "gender").is_empty());
    assert!(db.possible_feature_values(None, "case").is_empty());
}

#[test]
fn test_builder_matches_file_form() {
    let built = InMemoryDatabase::new("French")
        .with_category("n", None)
        .with_category("prop", Some("n"))
        .with_values("", "gender", &["f", "m"])
        .with_affixes("n", "number", &[("PL", "pl")]);
    assert!(built.validate().is_ok());
    assert_eq!(built.subcategories("n"), vec!["prop"]);
    assert_eq!(
        built.affix_glosses_for_feature("n", "number"),
        vec![FeatureForm::new("PL", "pl")]
    );
    assert!(built.lemmas_for_feature("n", "number").is_empty());
}

#[test]
fn test_unknown_parent_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"project_name": "X", "categories": {"prop": "n"}}"#,
    )
    .unwrap();
    let err = JsonLinguisticDatabase::load(&path).unwrap_err();
    assert!(matches!(err, rulegen_domain::Error::Database { .. }));
    assert!(err.to_string().contains("unknown parent 'n'"));
}

#[test]
fn test_features_for_unknown_category_are_rejected() {
    let db = InMemoryDatabase::new("X").with_values("v", "tense", &["past"]);
    assert!(db.validate().is_err());
}

#[test]
fn test_malformed_json_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = JsonLinguisticDatabase::load(&path).unwrap_err();
    assert!(matches!(err, rulegen_domain::Error::Json { .. }));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonLinguisticDatabase::load(dir.path().join("none.json")).unwrap_err();
    assert!(matches!(err, rulegen_domain::Error::Io { .. }));
}
