//! Tests for loading server configuration from disk.

use std::io::Write;
use std::time::Duration;
use strictly_server::ServerConfig;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
host = "0.0.0.0"
port = 8081
session_ttl_secs = 600
sweep_interval_secs = 15
"#,
    );

    let config = ServerConfig::from_file(file.path()).expect("valid config");
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(config.port(), &8081);
    assert_eq!(config.session_ttl(), Duration::from_secs(600));
    assert_eq!(config.sweep_interval(), Duration::from_secs(15));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let config = ServerConfig::load(Some(path.as_path())).expect("defaults");
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_cli_overrides_file() {
    let file = write_config("port = 4000\nsession_ttl_secs = 100\n");

    let config = ServerConfig::load(Some(file.path()))
        .expect("valid config")
        .with_overrides(None, Some(5000), None)
        .expect("valid overrides");
    assert_eq!(config.port(), &5000);
    assert_eq!(config.session_ttl(), Duration::from_secs(100));
}

#[test]
fn test_malformed_file_is_error() {
    let file = write_config("port = \"not a number\"\n");

    let err = ServerConfig::from_file(file.path()).expect_err("bad port");
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_zero_sweep_interval_rejected() {
    let file = write_config("sweep_interval_secs = 0\n");

    let err = ServerConfig::from_file(file.path()).expect_err("zero interval");
    assert!(err.message.contains("sweep_interval_secs"));
}
