//! Integration tests for the file-backed configuration store.

use gromit::config::{ConfigStore, FileConfigStore, GromitConfig};
use gromit::{ConfigError, Locale};

fn store_in(dir: &tempfile::TempDir) -> FileConfigStore {
    FileConfigStore::new(dir.path().join(".gromit.config"))
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert!(!store.exists());
    assert!(store.load().is_empty());
}

#[test]
fn test_update_then_load_round_trips_on_disk_format() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store
        .update(GromitConfig {
            ai_url: Some("https://api.openai.com/v1/chat/completions".into()),
            api_key: Some("sk-abcdef123456".into()),
            ..Default::default()
        })
        .expect("Failed to save");
    store
        .update(GromitConfig {
            language: Some("pt-BR".into()),
            ..Default::default()
        })
        .expect("Failed to save");

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["aiUrl"], "https://api.openai.com/v1/chat/completions");
    assert_eq!(json["apiKey"], "sk-abcdef123456");
    assert_eq!(json["language"], "pt-BR");
    assert!(json.get("model").is_none());

    let loaded = store.load();
    assert_eq!(loaded.locale(), Locale::PtBr);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileConfigStore::new(dir.path().join("nested/dir/.gromit.config"));

    store.save(&GromitConfig::default()).expect("Failed to save");
    assert!(store.exists());
}

#[test]
fn test_malformed_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "{ not json").unwrap();

    assert!(store.exists());
    assert!(store.load().is_empty());
}

#[test]
fn test_validate_reports_missing_file_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    assert!(matches!(
        store.validate(),
        Err(ConfigError::NotFound { .. })
    ));
}

#[test]
fn test_validate_checks_url_before_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&GromitConfig::default()).unwrap();

    assert!(matches!(store.validate(), Err(ConfigError::MissingUrl)));

    store
        .update(GromitConfig {
            ai_url: Some("https://api.example.com".into()),
            ..Default::default()
        })
        .unwrap();
    assert!(matches!(store.validate(), Err(ConfigError::MissingApiKey)));
}

#[test]
fn test_validate_defaults_model_and_locale() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store
        .save(&GromitConfig {
            ai_url: Some("https://api.example.com".into()),
            api_key: Some("sk-test".into()),
            model: None,
            language: Some("es-MX".into()),
        })
        .unwrap();

    let validated = store.validate().expect("Config should be valid");
    assert_eq!(validated.model, "gpt-4.1");
    assert_eq!(validated.locale, Locale::Es);
    assert_eq!(validated.credentials.endpoint, "https://api.example.com");
}

#[test]
fn test_remove_reports_whether_file_existed() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&GromitConfig::default()).unwrap();

    assert!(store.remove().unwrap());
    assert!(!store.exists());
    assert!(!store.remove().unwrap());
}
