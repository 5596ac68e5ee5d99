use std::{collections::HashMap, fs, path::Path, time::Duration};

use shared::protocol::{DEFAULT_NUM_RESULTS, MAX_NUM_RESULTS};

pub const CONFIG_FILE_NAME: &str = "exam_search.toml";
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub num_results: u32,
    pub status_poll_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub auto_open_viewer: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            num_results: DEFAULT_NUM_RESULTS,
            status_poll_interval: STATUS_POLL_INTERVAL,
            request_timeout: None,
            auto_open_viewer: true,
        }
    }
}

/// Defaults, then `exam_search.toml` in the working directory, then the environment.
pub fn load_settings() -> ClientSettings {
    load_settings_with(Path::new(CONFIG_FILE_NAME), |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    match fs::read_to_string(config_path) {
        Ok(raw) => match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => {
                let file_cfg: HashMap<String, String> = file_cfg
                    .into_iter()
                    .filter_map(|(key, value)| value_as_string(value).map(|v| (key, v)))
                    .collect();
                apply_overrides(&mut settings, |key| file_cfg.get(key).cloned());
            }
            Err(err) => {
                tracing::warn!(path = %config_path.display(), "ignoring unreadable config file: {err}");
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            tracing::warn!(path = %config_path.display(), "failed to read config file: {err}");
        }
    }

    apply_overrides(&mut settings, |key| {
        env(&format!("EXAM_SEARCH_{}", key.to_ascii_uppercase()))
    });

    settings
}

fn apply_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("server_url").filter(|v| !v.trim().is_empty()) {
        settings.server_url = v.trim().to_string();
    }
    if let Some(v) = lookup("num_results") {
        match v.trim().parse::<u32>() {
            Ok(parsed) => settings.num_results = clamp_num_results(parsed),
            Err(_) => tracing::warn!(value = %v, "ignoring non-numeric num_results"),
        }
    }
    if let Some(v) = lookup("poll_interval_ms") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            if parsed > 0 {
                settings.status_poll_interval = Duration::from_millis(parsed);
            }
        }
    }
    if let Some(v) = lookup("request_timeout_secs") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout = (parsed > 0).then(|| Duration::from_secs(parsed));
        }
    }
    if let Some(v) = lookup("auto_open_viewer") {
        if let Some(parsed) = parse_flag(&v) {
            settings.auto_open_viewer = parsed;
        }
    }
}

pub fn clamp_num_results(value: u32) -> u32 {
    value.clamp(1, MAX_NUM_RESULTS)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn value_as_string(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
