// src/device.rs
use crate::config::AppConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device class the viewer is running on.
///
/// TV is detected by user agent or screen width >= the tablet breakpoint
/// (1920px). Tablet is 768px - 1919px. Mobile is < 768px. Computed once per
/// session from the injected user agent and width, then passed explicitly.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Tv,
    Tablet,
    Mobile,
}

impl DeviceType {
    pub fn detect(user_agent: &str, screen_width: u32, config: &AppConfig) -> Self {
        let ua = user_agent.to_lowercase();
        let is_tv_agent = config
            .tv_user_agents
            .iter()
            .any(|agent| ua.contains(&agent.to_lowercase()));

        if is_tv_agent || screen_width >= config.breakpoint_tablet {
            DeviceType::Tv
        } else if screen_width >= config.breakpoint_mobile {
            DeviceType::Tablet
        } else {
            DeviceType::Mobile
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::Tv => write!(f, "tv"),
            DeviceType::Tablet => write!(f, "tablet"),
            DeviceType::Mobile => write!(f, "mobile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_breakpoints() {
        let config = AppConfig::default();
        assert_eq!(DeviceType::detect("Mozilla/5.0", 767, &config), DeviceType::Mobile);
        assert_eq!(DeviceType::detect("Mozilla/5.0", 768, &config), DeviceType::Tablet);
        assert_eq!(DeviceType::detect("Mozilla/5.0", 1919, &config), DeviceType::Tablet);
        assert_eq!(DeviceType::detect("Mozilla/5.0", 1920, &config), DeviceType::Tv);
    }

    #[test]
    fn test_tv_user_agent_wins_over_width() {
        let config = AppConfig::default();
        assert_eq!(
            DeviceType::detect("Mozilla/5.0 (Web0S; Linux/SmartTV)", 360, &config),
            DeviceType::Tv
        );
        // Case-insensitive match
        assert_eq!(
            DeviceType::detect("mozilla/5.0 tizen 7.0", 360, &config),
            DeviceType::Tv
        );
    }

    #[test]
    fn test_display_tags() {
        assert_eq!(DeviceType::Tv.to_string(), "tv");
        assert_eq!(DeviceType::Tablet.to_string(), "tablet");
        assert_eq!(DeviceType::Mobile.to_string(), "mobile");
    }
}
