use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_select_local_base_url_and_development() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, None);
    assert_eq!(settings.environment, Environment::Development);
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_toml(
        &mut settings,
        r#"
api_base_url = "https://api.turl.co/"
environment = "production"
request_timeout_secs = 10
"#,
        Path::new("turl.toml"),
    )
    .expect("valid settings file");

    assert_eq!(settings.api_base_url.as_deref(), Some("https://api.turl.co/"));
    assert_eq!(settings.environment, Environment::Production);
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(10)));
}

#[test]
fn env_overrides_win_over_file_values() {
    let mut settings = Settings::default();
    apply_toml(
        &mut settings,
        "api_base_url = \"https://file.example/\"\nenvironment = \"staging\"",
        Path::new("turl.toml"),
    )
    .expect("valid settings file");

    apply_env(
        &mut settings,
        lookup_from(&[
            ("TURL_API_BASE_URL", "https://env.example/"),
            ("APP__ENV", "prod"),
        ]),
    )
    .expect("valid env");

    assert_eq!(settings.api_base_url.as_deref(), Some("https://env.example/"));
    assert_eq!(settings.environment, Environment::Production);
}

#[test]
fn blank_base_url_falls_back_to_default() {
    let mut settings = Settings {
        api_base_url: Some("https://old.example/".to_string()),
        ..Settings::default()
    };
    apply_env(&mut settings, lookup_from(&[("TURL_API_BASE_URL", "   ")])).expect("valid env");
    assert_eq!(settings.api_base_url, None);
}

#[test]
fn rejects_unknown_environment_names() {
    let mut settings = Settings::default();
    let err = apply_env(&mut settings, lookup_from(&[("TURL_ENV", "qa")])).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::InvalidValue { key: "environment", .. }
    ));
}

#[test]
fn rejects_non_numeric_timeout() {
    let mut settings = Settings::default();
    let err = apply_env(
        &mut settings,
        lookup_from(&[("TURL_REQUEST_TIMEOUT_SECS", "soon")]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("TURL_REQUEST_TIMEOUT_SECS"));
}

#[test]
fn zero_timeout_means_transport_default() {
    let settings = Settings {
        request_timeout_secs: Some(0),
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn unknown_file_keys_are_reported() {
    let mut settings = Settings::default();
    let err = apply_toml(&mut settings, "base = \"x\"", Path::new("turl.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::Parse { .. }));
}

#[test]
fn explicit_missing_settings_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("turl_missing_{suffix}.toml"));

    let err = load_settings_with(Some(&path), lookup_from(&[])).unwrap_err();
    assert!(matches!(err, SettingsError::Read { .. }));
}

#[test]
fn loads_explicit_settings_file_then_env() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("turl_settings_{suffix}.toml"));
    fs::write(&path, "request_timeout_secs = 7\nenvironment = \"staging\"\n")
        .expect("write settings");

    let settings = load_settings_with(Some(&path), lookup_from(&[])).expect("load settings");
    assert_eq!(settings.request_timeout_secs, Some(7));
    assert_eq!(settings.environment, Environment::Staging);

    let settings = load_settings_with(
        Some(&path),
        lookup_from(&[("TURL_ENV", "prod"), ("TURL_REQUEST_TIMEOUT_SECS", "3")]),
    )
    .expect("load settings");
    assert_eq!(settings.request_timeout_secs, Some(3));
    assert_eq!(settings.environment, Environment::Production);

    fs::remove_file(path).expect("cleanup");
}
