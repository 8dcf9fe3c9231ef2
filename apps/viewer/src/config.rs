use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use events_core::DEFAULT_API_BASE_URL;
use shared::domain::{OrganizationId, PerPage};
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "viewer.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub organization_id: Option<i64>,
    pub per_page: u32,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            organization_id: None,
            per_page: PerPage::default().as_u32(),
            request_timeout_secs: 15,
            log_filter: "info".into(),
        }
    }
}

/// Validated settings the viewer runs with.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub api_base_url: Url,
    pub organization_id: OrganizationId,
    pub per_page: PerPage,
    pub request_timeout: Duration,
    pub log_filter: String,
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    let text = |key: &str| {
        file_cfg.get(key).and_then(|value| match value {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            _ => None,
        })
    };

    if let Some(v) = text("api_base_url") {
        settings.api_base_url = v;
    }
    if let Some(v) = text("organization_id").and_then(|v| v.parse().ok()) {
        settings.organization_id = Some(v);
    }
    if let Some(v) = text("per_page").and_then(|v| v.parse().ok()) {
        settings.per_page = v;
    }
    if let Some(v) = text("request_timeout_secs").and_then(|v| v.parse().ok()) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = text("log_filter") {
        settings.log_filter = v;
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for key in ["EVENTS_API_URL", "APP__API_BASE_URL"] {
        if let Some(v) = lookup(key) {
            settings.api_base_url = v;
        }
    }
    for key in ["EVENTS_ORGANIZATION_ID", "APP__ORGANIZATION_ID"] {
        if let Some(v) = lookup(key).and_then(|v| v.parse().ok()) {
            settings.organization_id = Some(v);
        }
    }
    if let Some(v) = lookup("APP__PER_PAGE").and_then(|v| v.parse().ok()) {
        settings.per_page = v;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

impl Settings {
    pub fn validate(self) -> anyhow::Result<ViewerConfig> {
        let api_base_url = Url::parse(self.api_base_url.trim())
            .with_context(|| format!("invalid api_base_url '{}'", self.api_base_url))?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "api_base_url must use http or https, got '{}'",
                api_base_url.scheme()
            ));
        }
        let organization_id = self.organization_id.ok_or_else(|| {
            anyhow!("organization id is required (--organization-id, EVENTS_ORGANIZATION_ID or organization_id in {DEFAULT_CONFIG_PATH})")
        })?;
        let per_page = PerPage::try_from(self.per_page).map_err(|e| anyhow!(e))?;
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than zero"));
        }

        Ok(ViewerConfig {
            api_base_url,
            organization_id: OrganizationId(organization_id),
            per_page,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            log_filter: self.log_filter,
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
