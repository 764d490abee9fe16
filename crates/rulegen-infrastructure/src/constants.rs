//! Infrastructure layer constants
//!
//! Transfer-format names live in `rulegen_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "rulegen.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "rulegen";

/// Environment variable prefix for configuration (`RULEGEN__GENERATOR__INDENT`)
pub const CONFIG_ENV_PREFIX: &str = "RULEGEN__";

/// Separator between nested keys in configuration environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a filter directive that overrides the level
pub const LOG_FILTER_ENV: &str = "RULEGEN_LOG";

/// File name stem of the rolling log file when none is configured
pub const LOG_FILE_STEM: &str = "rulegen";
