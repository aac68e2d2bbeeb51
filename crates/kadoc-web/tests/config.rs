use std::time::Duration;

use kadoc_web::config::{load_config_from, save_config_to, KadocConfig};
use kadoc_web::locale::Locale;

#[test]
fn defaults() {
    let config = KadocConfig::default();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.api_url, "http://localhost:3006/api");
    assert_eq!(config.locale, Locale::En);
    assert_eq!(config.quiet_period(), Duration::from_millis(500));
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = KadocConfig {
        config_version: 0,
        api_url: "https://kadoc.example/api".to_string(),
        locale: Locale::Fr,
        debounce_ms: 250,
    };

    let path = save_config_to(&dir.path().join("kadoc"), &config).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.config_version, 1, "save stamps the current version");
    assert_eq!(loaded.api_url, config.api_url);
    assert_eq!(loaded.locale, Locale::Fr);
    assert_eq!(loaded.quiet_period(), Duration::from_millis(250));
}

#[cfg(unix)]
#[test]
fn saved_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = save_config_to(dir.path(), &KadocConfig::default()).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"api_url": "http://10.0.0.5:3006/api", "locale": "fr"}"#).unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.debounce_ms, 500);
    assert_eq!(config.api_url, "http://10.0.0.5:3006/api");
    assert_eq!(config.locale, Locale::Fr);
}

#[test]
fn migration_keeps_existing_debounce() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"api_url": "http://x/api", "debounce_ms": 120}"#).unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.debounce_ms, 120);
    assert_eq!(config.locale, Locale::En);
}

#[test]
fn newer_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"config_version": 9, "api_url": "http://x/api", "debounce_ms": 500}"#,
    )
    .unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer"), "{err}");
}

#[test]
fn out_of_range_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    // 2^32 + 1 would wrap to version 1
    for version in ["4294967297", "-1", "\"1\""] {
        std::fs::write(
            &path,
            format!(r#"{{"config_version": {version}, "api_url": "http://x/api", "debounce_ms": 500}}"#),
        )
        .unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config_version"), "{version}: {err}");
    }
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config_from(&dir.path().join("absent.json")).is_err());
}

#[test]
fn api_url_precedence() {
    let config = KadocConfig::default();

    assert_eq!(
        config.resolve_api_url_with(Some("http://flag/api"), Some("http://env/api".into())),
        "http://flag/api"
    );
    assert_eq!(
        config.resolve_api_url_with(None, Some("http://env/api".into())),
        "http://env/api"
    );
    assert_eq!(config.resolve_api_url_with(None, None), config.api_url);
    assert_eq!(
        config.resolve_api_url_with(None, Some("  ".into())),
        config.api_url
    );
}
