//! Error type tests

use std::io;

use rulegen_domain::Error;

#[test]
fn test_io_error_names_the_path() {
    let err = Error::io(
        "rules/transfer_rules.t1x",
        io::Error::new(io::ErrorKind::NotFound, "missing"),
    );
    let message = err.to_string();
    assert!(message.contains("rules/transfer_rules.t1x"));
    assert!(message.contains("missing"));
    assert!(!err.is_structural());
}

#[test]
fn test_xml_error_is_structural() {
    let err = Error::xml("spec.xml", "unexpected end of file");
    assert!(err.is_structural());
    assert_eq!(
        err.to_string(),
        "XML parse error in spec.xml: unexpected end of file"
    );
}

#[test]
fn test_json_error_converts() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = source.into();
    assert!(matches!(err, Error::Json { .. }));
}

#[test]
fn test_message_constructors() {
    assert_eq!(
        Error::config("bad indent").to_string(),
        "Configuration error: bad indent"
    );
    assert_eq!(
        Error::database("no categories").to_string(),
        "Linguistic database error: no categories"
    );
}
