//! Page configuration as data.
//!
//! Every section defaults to the stock landing page markup, so hosts only
//! pass the fields they override:
//!
//! ```
//! use landing_core::LandingConfig;
//!
//! let config = LandingConfig::from_json(r#"{ "scroll": { "header_offset_px": 64.0 } }"#).unwrap();
//! assert_eq!(config.scroll.header_offset_px, 64.0);
//! assert_eq!(config.carousel.swipe_threshold_px, 50.0);
//! ```

use core::time::Duration;

use landing_i18n::I18nConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse landing config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid landing config: {0}")]
    Validation(String),
}

/// All page settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub i18n: I18nConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub carousel: CarouselConfig,
    pub scroll: ScrollConfig,
    pub chrome: ChromeConfig,
}

impl LandingConfig {
    /// Parse and validate a (possibly partial) JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.i18n.is_supported(&self.i18n.default_language) {
            return Err(ConfigError::Validation(format!(
                "default language '{}' is not in the supported set",
                self.i18n.default_language
            )));
        }
        if !self.i18n.path_template.contains("{code}") {
            return Err(ConfigError::Validation(
                "i18n.path_template must contain {code}".into(),
            ));
        }
        for (name, threshold) in [
            ("reveal.threshold", self.reveal.threshold),
            ("counter.threshold", self.counter.threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be within [0, 1], got {threshold}"
                )));
            }
        }
        if !self.carousel.swipe_threshold_px.is_finite() || self.carousel.swipe_threshold_px < 0.0
        {
            return Err(ConfigError::Validation(
                "carousel.swipe_threshold_px must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Scroll-triggered reveal of cards and steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub target_classes: Vec<String>,
    pub revealed_class: String,
    pub threshold: f64,
    pub root_margin: String,
    pub stagger_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            target_classes: vec!["feature-card".into(), "workflow-step".into()],
            revealed_class: "animate".into(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
            stagger_ms: 100,
        }
    }
}

impl RevealConfig {
    #[must_use]
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

/// Counting-number animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub counter_class: String,
    pub target_attribute: String,
    pub threshold: f64,
    pub duration_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            counter_class: "countries-number".into(),
            target_attribute: "data-target".into(),
            threshold: 0.5,
            duration_ms: 2000,
        }
    }
}

impl CounterConfig {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Image carousel markup and gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub track_class: String,
    pub item_class: String,
    pub prev_class: String,
    pub next_class: String,
    pub dot_class: String,
    pub active_class: String,
    pub prev_key: String,
    pub next_key: String,
    /// Horizontal displacement a swipe must exceed.
    pub swipe_threshold_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            track_class: "gallery-track".into(),
            item_class: "gallery-item".into(),
            prev_class: "carousel-btn-prev".into(),
            next_class: "carousel-btn-next".into(),
            dot_class: "dot".into(),
            active_class: "active".into(),
            prev_key: "ArrowLeft".into(),
            next_key: "ArrowRight".into(),
            swipe_threshold_px: 50.0,
        }
    }
}

/// In-page anchor navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub href_prefix: String,
    /// Height of the fixed header kept clear above the target.
    pub header_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            href_prefix: "#".into(),
            header_offset_px: 80.0,
        }
    }
}

/// Footer year, header shadow and keyboard focus hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub year_element_id: String,
    pub header_class: String,
    pub shadow_after_px: f64,
    pub header_shadow: String,
    pub focus_key: String,
    pub focus_class: String,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            year_element_id: "current-year".into(),
            header_class: "header".into(),
            shadow_after_px: 50.0,
            header_shadow: "0 2px 10px rgba(0, 0, 0, 0.1)".into(),
            focus_key: "Tab".into(),
            focus_class: "user-is-tabbing".into(),
        }
    }
}
