// src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// --- APP CONFIGURATION ---
// Everything tunable in one place: auth, device breakpoints, slideshow
// timing and audio defaults. A `config.json` in the data directory
// overrides the defaults; anything unreadable falls back silently.

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub pin: String,
    pub auth_expiry_days: i64,
    pub default_photo_duration: f64,
    pub countdown_duration: u32,
    pub controls_hide_delay_ms: u64,
    pub preload_count: usize,
    pub default_music_volume: f64,
    pub breakpoint_mobile: u32,
    pub breakpoint_tablet: u32,
    pub tv_user_agents: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pin: "123456".to_string(),
            auth_expiry_days: 30,
            default_photo_duration: 5.0,
            countdown_duration: 5,
            controls_hide_delay_ms: 3000,
            preload_count: 20,
            default_music_volume: 0.3,
            breakpoint_mobile: 768,
            breakpoint_tablet: 1920,
            tv_user_agents: ["Web0S", "webOS", "Tizen", "SmartTV", "BRAVIA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    pub fn load(data_dir: &Path) -> Self {
        let file_path = data_dir.join("config.json");

        if file_path.exists() {
            match fs::read_to_string(&file_path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => AppConfig::default(),
            }
        } else {
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.pin, "123456");
        assert_eq!(config.auth_expiry_days, 30);
        assert_eq!(config.countdown_duration, 5);
        assert_eq!(config.preload_count, 20);
        assert_eq!(config.breakpoint_mobile, 768);
        assert_eq!(config.breakpoint_tablet, 1920);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load(Path::new("/nonexistent/photo-stories"));
        assert_eq!(config.pin, AppConfig::default().pin);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"pin": "654321"}"#).unwrap();
        assert_eq!(config.pin, "654321");
        assert_eq!(config.default_music_volume, 0.3);
    }
}
