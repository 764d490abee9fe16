//! Environment overrides for configuration
//!
//! These tests modify environment variables and must run sequentially:
//!
//! ```bash
//! cargo test -p rulegen-infrastructure --test unit env_config -- --test-threads=1 --ignored
//! ```

use std::env;

use rulegen_infrastructure::ConfigLoader;

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

fn empty_config() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rulegen.toml");
    std::fs::write(&path, "[generator]\nindent = 3\n").unwrap();
    (dir, path)
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let (_dir, path) = empty_config();
    set_env("RULEGEN__GENERATOR__INDENT", "6");
    set_env("RULEGEN__GENERATOR__MAX_PERMUTATION_WORDS", "4");

    let config = ConfigLoader::new().with_config_path(&path).load();

    remove_env("RULEGEN__GENERATOR__INDENT");
    remove_env("RULEGEN__GENERATOR__MAX_PERMUTATION_WORDS");
    let config = config.unwrap();
    assert_eq!(config.generator.indent, 6);
    assert_eq!(config.generator.max_permutation_words, 4);
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_single_underscore_prefix_is_ignored() {
    let (_dir, path) = empty_config();
    set_env("RULEGEN_GENERATOR_INDENT", "6");

    let config = ConfigLoader::new().with_config_path(&path).load();

    remove_env("RULEGEN_GENERATOR_INDENT");
    assert_eq!(config.unwrap().generator.indent, 3);
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_invalid_env_value_fails_validation() {
    let (_dir, path) = empty_config();
    set_env("RULEGEN__LOGGING__LEVEL", "chatty");

    let result = ConfigLoader::new().with_config_path(&path).load();

    remove_env("RULEGEN__LOGGING__LEVEL");
    assert!(result.is_err());
}
