use crate::log::LogLevel;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_NAV_SHADOW_OFFSET: f64 = 100.0;
pub const DEFAULT_BACK_TO_TOP_OFFSET: f64 = 500.0;
pub const DEFAULT_COUNTER_DURATION_MS: u32 = 2_000;
pub const DEFAULT_NOTIFICATION_DISPLAY_MS: u32 = 4_000;
pub const DEFAULT_NOTIFICATION_FADE_MS: u32 = 300;
pub const DEFAULT_SUBMIT_LATENCY_MS: u32 = 1_500;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_COUNTER_THRESHOLD: f64 = 0.5;
pub const DEFAULT_REVEAL_SELECTOR: &str = ".about-card, .project-card, .timeline-item, .skill-category";
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const NAV_SHADOW_OFFSET_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const BACK_TO_TOP_OFFSET_BOUNDS: (f64, f64) = (0.0, 50_000.0);
const COUNTER_DURATION_MS_BOUNDS: (u32, u32) = (1, 60_000);
const NOTIFICATION_DISPLAY_MS_BOUNDS: (u32, u32) = (500, 60_000);
const NOTIFICATION_FADE_MS_BOUNDS: (u32, u32) = (0, 5_000);
const SUBMIT_LATENCY_MS_BOUNDS: (u32, u32) = (0, 30_000);
const THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("site config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub nav_shadow_offset: f64,
    pub back_to_top_offset: f64,
    pub counter_duration_ms: u32,
    pub notification_display_ms: u32,
    pub notification_fade_ms: u32,
    pub submit_latency_ms: u32,
    pub reveal_threshold: f64,
    pub counter_threshold: f64,
    pub reveal_selector: String,
    pub submit_endpoint: Option<String>,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            nav_shadow_offset: DEFAULT_NAV_SHADOW_OFFSET,
            back_to_top_offset: DEFAULT_BACK_TO_TOP_OFFSET,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            notification_display_ms: DEFAULT_NOTIFICATION_DISPLAY_MS,
            notification_fade_ms: DEFAULT_NOTIFICATION_FADE_MS,
            submit_latency_ms: DEFAULT_SUBMIT_LATENCY_MS,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            counter_threshold: DEFAULT_COUNTER_THRESHOLD,
            reveal_selector: DEFAULT_REVEAL_SELECTOR.to_string(),
            submit_endpoint: None,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSiteConfig {
    nav_shadow_offset: Option<f64>,
    back_to_top_offset: Option<f64>,
    counter_duration_ms: Option<f64>,
    notification_display_ms: Option<f64>,
    notification_fade_ms: Option<f64>,
    submit_latency_ms: Option<f64>,
    reveal_threshold: Option<f64>,
    counter_threshold: Option<f64>,
    reveal_selector: Option<String>,
    submit_endpoint: Option<String>,
    log_level: Option<String>,
}

impl SiteConfig {
    /// Parses the JSON block. Unknown keys are ignored and every value outside
    /// its bounds falls back to the default.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawSiteConfig = serde_json::from_str(source)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawSiteConfig) -> Self {
        Self {
            nav_shadow_offset: f64_with_bounds(
                raw.nav_shadow_offset,
                DEFAULT_NAV_SHADOW_OFFSET,
                NAV_SHADOW_OFFSET_BOUNDS,
            ),
            back_to_top_offset: f64_with_bounds(
                raw.back_to_top_offset,
                DEFAULT_BACK_TO_TOP_OFFSET,
                BACK_TO_TOP_OFFSET_BOUNDS,
            ),
            counter_duration_ms: millis_with_bounds(
                raw.counter_duration_ms,
                DEFAULT_COUNTER_DURATION_MS,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            notification_display_ms: millis_with_bounds(
                raw.notification_display_ms,
                DEFAULT_NOTIFICATION_DISPLAY_MS,
                NOTIFICATION_DISPLAY_MS_BOUNDS,
            ),
            notification_fade_ms: millis_with_bounds(
                raw.notification_fade_ms,
                DEFAULT_NOTIFICATION_FADE_MS,
                NOTIFICATION_FADE_MS_BOUNDS,
            ),
            submit_latency_ms: millis_with_bounds(
                raw.submit_latency_ms,
                DEFAULT_SUBMIT_LATENCY_MS,
                SUBMIT_LATENCY_MS_BOUNDS,
            ),
            reveal_threshold: f64_with_bounds(
                raw.reveal_threshold,
                DEFAULT_REVEAL_THRESHOLD,
                THRESHOLD_BOUNDS,
            ),
            counter_threshold: f64_with_bounds(
                raw.counter_threshold,
                DEFAULT_COUNTER_THRESHOLD,
                THRESHOLD_BOUNDS,
            ),
            reveal_selector: non_empty(raw.reveal_selector)
                .unwrap_or_else(|| DEFAULT_REVEAL_SELECTOR.to_string()),
            submit_endpoint: non_empty(raw.submit_endpoint),
            log_level: raw
                .log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

fn f64_with_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn millis_with_bounds(value: Option<f64>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .filter(|value| (f64::from(bounds.0)..=f64::from(bounds.1)).contains(value))
        .map(|value| value as u32)
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let config = SiteConfig::from_json("  ").expect("blank config is accepted");
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn overrides_within_bounds_are_applied() {
        let config = SiteConfig::from_json(
            r#"{
                "navShadowOffset": 64,
                "counterDurationMs": 1200,
                "revealThreshold": 0.25,
                "submitEndpoint": " https://forms.example.com/contact ",
                "logLevel": "debug"
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.nav_shadow_offset, 64.0);
        assert_eq!(config.counter_duration_ms, 1_200);
        assert_eq!(config.reveal_threshold, 0.25);
        assert_eq!(
            config.submit_endpoint.as_deref(),
            Some("https://forms.example.com/contact")
        );
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.back_to_top_offset, DEFAULT_BACK_TO_TOP_OFFSET);
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_defaults() {
        let config = SiteConfig::from_json(
            r#"{
                "counterDurationMs": 0,
                "notificationDisplayMs": 12.5,
                "counterThreshold": 1.5,
                "revealSelector": "   ",
                "logLevel": "verbose"
            }"#,
        )
        .expect("valid JSON");

        assert_eq!(config.counter_duration_ms, DEFAULT_COUNTER_DURATION_MS);
        assert_eq!(config.notification_display_ms, DEFAULT_NOTIFICATION_DISPLAY_MS);
        assert_eq!(config.counter_threshold, DEFAULT_COUNTER_THRESHOLD);
        assert_eq!(config.reveal_selector, DEFAULT_REVEAL_SELECTOR);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = SiteConfig::from_json("{ navShadowOffset: ");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
