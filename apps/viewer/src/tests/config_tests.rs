use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_use_public_api_and_smallest_page_size() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.per_page, 10);
    assert_eq!(settings.organization_id, None);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
api_base_url = "http://localhost:9000/v1"
organization_id = 1234
per_page = "25"
log_filter = "debug"
"#,
    );
    assert_eq!(settings.api_base_url, "http://localhost:9000/v1");
    assert_eq!(settings.organization_id, Some(1234));
    assert_eq!(settings.per_page, 25);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparsable_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "this is = not [toml");
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_file_and_prefers_app_prefix() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "organization_id = 1");
    apply_env(
        &mut settings,
        env_from(&[
            ("EVENTS_ORGANIZATION_ID", "2"),
            ("APP__ORGANIZATION_ID", "3"),
            ("APP__PER_PAGE", "100"),
            ("APP__REQUEST_TIMEOUT_SECS", "not-a-number"),
        ]),
    );
    assert_eq!(settings.organization_id, Some(3));
    assert_eq!(settings.per_page, 100);
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn validate_requires_organization() {
    let err = Settings::default().validate().expect_err("missing org");
    assert!(err.to_string().contains("organization id is required"));
}

#[test]
fn validate_rejects_unsupported_page_size_and_scheme() {
    let settings = Settings {
        organization_id: Some(1),
        per_page: 50,
        ..Settings::default()
    };
    assert!(settings.validate().is_err());

    let settings = Settings {
        organization_id: Some(1),
        api_base_url: "ftp://example.test/v1".into(),
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn validate_produces_typed_config() {
    let config = Settings {
        organization_id: Some(77),
        per_page: 25,
        ..Settings::default()
    }
    .validate()
    .expect("valid");
    assert_eq!(config.organization_id, OrganizationId(77));
    assert_eq!(config.per_page, PerPage::TwentyFive);
    assert_eq!(config.request_timeout, Duration::from_secs(15));
    assert_eq!(config.api_base_url.as_str(), "https://api.mobilize.us/v1");
}

#[test]
fn load_settings_reads_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("events_viewer_test_{suffix}.toml"));
    fs::write(&path, "per_page = 25\nlog_filter = \"warn\"\n").expect("write config");

    let settings = load_settings(&path);
    assert_eq!(settings.log_filter, "warn");

    fs::remove_file(path).expect("cleanup");
}
