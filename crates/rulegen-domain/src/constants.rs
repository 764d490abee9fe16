//! Domain layer constants
//!
//! Element names and naming prefixes of the transfer file and the rule
//! specification format.

// ============================================================================
// TRANSFER FILE
// ============================================================================

/// Root element of a transfer file
pub const TRANSFER_ROOT: &str = "transfer";

/// DOCTYPE body written for transfer files that have none
pub const TRANSFER_DOCTYPE: &str =
    r#"transfer PUBLIC "-//XMLmind//DTD transfer//EN" "transfer.dtd""#;

/// Attribute holding the name of a definition
pub const NAME_ATTR: &str = "n";

/// Attribute holding the name of a rule
pub const RULE_NAME_ATTR: &str = "comment";

/// Attribute listing every grammatical category
pub const GRAM_CAT_ATTRIBUTE: &str = "a_gram_cat";

/// Prefix of generated category names
pub const CATEGORY_PREFIX: &str = "c_";

/// Prefix of generated attribute names
pub const ATTRIBUTE_PREFIX: &str = "a_";

/// Prefix of generated variable names
pub const VARIABLE_PREFIX: &str = "v_";

/// Prefix of generated macro names
pub const MACRO_PREFIX: &str = "m_";

// ============================================================================
// RULE SPECIFICATION
// ============================================================================

/// Root element of a rule specification
pub const SPEC_ROOT: &str = "FLExTransRuleGenerator";

/// Attribute value meaning "true" in the specification format
pub const YES: &str = "yes";
