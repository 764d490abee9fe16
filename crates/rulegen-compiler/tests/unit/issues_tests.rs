//! Compile issue tests

use rulegen_compiler::{CompileIssue, Phrase};
use rulegen_domain::Severity;

#[test]
fn test_rule_level_issues_skip_the_rule() {
    let issue = CompileIssue::MissingHead {
        rule: "NP".to_string(),
    };
    assert_eq!(issue.severity(), Severity::Error);
    assert!(issue.skips_rule());
    assert_eq!(
        issue.to_string(),
        "Rule 'NP': no target word is marked as head"
    );
}

#[test]
fn test_feature_level_issues_do_not_skip() {
    let issue = CompileIssue::UnresolvedFeature {
        category: "n".to_string(),
        label: "case".to_string(),
    };
    assert!(!issue.skips_rule());
    assert!(issue.to_string().contains("'case'"));
}

#[test]
fn test_ignored_head_feature_is_a_warning() {
    let issue = CompileIssue::IgnoredHeadFeature {
        rule: "NP".to_string(),
        word_id: "2".to_string(),
        label: "gender".to_string(),
    };
    assert_eq!(issue.severity(), Severity::Warning);
    assert!(!issue.skips_rule());
}

#[test]
fn test_messages_name_the_phrase() {
    let issue = CompileIssue::DuplicateWordId {
        rule: "NP".to_string(),
        phrase: Phrase::Target,
        word_id: "1".to_string(),
    };
    assert_eq!(
        issue.to_string(),
        "Rule 'NP': id '1' is used more than once in the target phrase"
    );
}
