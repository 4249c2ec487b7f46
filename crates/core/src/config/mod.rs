use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AutoplayPolicy, Language, Result};

/// Top-level configuration structure for the page behaviour.
///
/// Every field defaults to the value the live memorial page uses, so an empty
/// JSON object is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub language: LanguageConfig,
    pub navigation: NavigationConfig,
    pub scroll: ScrollConfig,
    pub observers: ObserverConfig,
    pub touch: TouchConfig,
    pub layout: LayoutConfig,
    pub media: MediaConfig,
    /// Images fetched ahead of time during initialisation.
    pub preload: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            language: LanguageConfig::default(),
            navigation: NavigationConfig::default(),
            scroll: ScrollConfig::default(),
            observers: ObserverConfig::default(),
            touch: TouchConfig::default(),
            layout: LayoutConfig::default(),
            media: MediaConfig::default(),
            preload: vec!["photo.jpg".to_string(), "berlin.jpg".to_string()],
        }
    }
}

impl PageConfig {
    /// Reads a JSON configuration file. Missing sections fall back to defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LanguageConfig {
    pub initial: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Height of the fixed header subtracted from anchor scroll targets.
    pub header_offset: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub scroll_top_threshold: f64,
    pub navbar_threshold: f64,
    pub navbar_solid: String,
    pub navbar_translucent: String,
    pub parallax_speed: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_top_threshold: 300.0,
            navbar_threshold: 100.0,
            navbar_solid: "rgba(0, 0, 0, 0.98)".to_string(),
            navbar_translucent: "rgba(0, 0, 0, 0.95)".to_string(),
            parallax_speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub video_threshold: f64,
    pub reveal_threshold: f64,
    /// Added to the bottom edge of the viewport; negative values shrink it.
    pub reveal_bottom_margin: f64,
    pub lazy_threshold: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            video_threshold: 0.5,
            reveal_threshold: 0.1,
            reveal_bottom_margin: -50.0,
            lazy_threshold: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Minimum vertical travel for a touch to count as a swipe.
    pub swipe_threshold: f64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub mobile_breakpoint: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MediaConfig {
    /// Policy applied to media elements that do not declare their own.
    pub autoplay: AutoplayPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_page_defaults() {
        let config: PageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.language.initial, Language::Ru);
        assert_eq!(config.navigation.header_offset, 80.0);
        assert_eq!(config.scroll.scroll_top_threshold, 300.0);
        assert_eq!(config.touch.swipe_threshold, 50.0);
        assert_eq!(config.media.autoplay, AutoplayPolicy::RequiresActivation);
        assert_eq!(config.preload, vec!["photo.jpg", "berlin.jpg"]);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: PageConfig =
            serde_json::from_str(r#"{"scroll": {"navbar_threshold": 40}}"#).unwrap();
        assert_eq!(config.scroll.navbar_threshold, 40.0);
        assert_eq!(config.scroll.parallax_speed, 0.5);
    }
}
