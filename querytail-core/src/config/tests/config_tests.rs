use crate::config::{ADDRESS_ENV, ClientConfig, ConfigError, ConfigOverrides, DEFAULT_ADDRESS, TOKEN_ENV};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn reads_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "address: https://logs.example.com/\ntoken: secret\n").unwrap();

    let config = ClientConfig::from_file(&path).unwrap();

    assert_eq!(
        config,
        ClientConfig {
            address: "https://logs.example.com/".to_string(),
            token: Some("secret".to_string()),
        }
    );
}

#[test]
fn missing_fields_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "token: t\n").unwrap();

    let config = ClientConfig::from_file(&path).unwrap();

    assert_eq!(config.address, DEFAULT_ADDRESS);
}

#[test]
fn empty_file_is_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "\n").unwrap();

    assert_eq!(ClientConfig::from_file(&path).unwrap(), ClientConfig::default());
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yaml");

    let err = ClientConfig::load(Some(&path), ConfigOverrides::default()).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn bad_yaml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "address: [unclosed\n").unwrap();

    assert!(matches!(
        ClientConfig::from_file(&path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn environment_then_overrides_take_precedence() {
    let mut config = ClientConfig::default();

    config.apply_env(|key| match key {
        k if k == ADDRESS_ENV => Some("http://env:8080/".to_string()),
        k if k == TOKEN_ENV => Some("env-token".to_string()),
        _ => None,
    });
    assert_eq!(config.address, "http://env:8080/");
    assert_eq!(config.token.as_deref(), Some("env-token"));

    config.apply_overrides(ConfigOverrides {
        address: None,
        token: Some("flag-token".to_string()),
    });
    assert_eq!(config.address, "http://env:8080/");
    assert_eq!(config.token.as_deref(), Some("flag-token"));
}

#[test]
fn empty_environment_values_are_ignored() {
    let mut config = ClientConfig::default();

    config.apply_env(|_| Some(String::new()));

    assert_eq!(config, ClientConfig::default());
}
