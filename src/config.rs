use anyhow::{Context, Result};

use crate::error::SlugError;
use crate::i18n::Locale;
use crate::redirect::RedirectEvaluator;
use crate::slug::{AutoPolicy, SlugNormalizer, SlugStrategy, DEFAULT_SECTION};

#[derive(Debug, Clone)]
pub struct Config {
    // Strategy
    pub default_strategy: SlugStrategy,
    pub short_max_length: usize,

    // Auto policy thresholds
    pub auto_long_source_chars: usize,
    pub auto_english_max_length: usize,

    // Paths
    pub section: String,
    pub default_locale: Locale,

    // Redirects
    pub permanent_redirects: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let policy = AutoPolicy::default();

        Ok(Self {
            // Strategy
            default_strategy: match std::env::var("SLUG_DEFAULT_STRATEGY") {
                Ok(value) => value
                    .parse::<SlugStrategy>()
                    .context("SLUG_DEFAULT_STRATEGY is not a known strategy")?,
                Err(_) => SlugStrategy::Auto,
            },
            short_max_length: std::env::var("SLUG_SHORT_MAX_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|len: &usize| *len > 0)
                .unwrap_or(policy.short_max_len),

            // Auto policy thresholds
            auto_long_source_chars: std::env::var("SLUG_AUTO_LONG_SOURCE_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(policy.long_source_chars),
            auto_english_max_length: std::env::var("SLUG_AUTO_ENGLISH_MAX_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(policy.english_max_len),

            // Paths
            section: match std::env::var("SLUG_SECTION") {
                Ok(value) => parse_section(&value).context("SLUG_SECTION is not a usable path")?,
                Err(_) => DEFAULT_SECTION.to_string(),
            },
            default_locale: match std::env::var("SLUG_DEFAULT_LOCALE") {
                Ok(code) => Locale::from_code(code.trim())
                    .context("SLUG_DEFAULT_LOCALE is not an enabled locale")?,
                Err(_) => Locale::default_locale(),
            },

            // Redirects
            permanent_redirects: match std::env::var("SLUG_PERMANENT_REDIRECTS") {
                Ok(value) => parse_bool(&value)
                    .context("SLUG_PERMANENT_REDIRECTS must be true or false")?,
                Err(_) => true,
            },
        })
    }

    pub fn auto_policy(&self) -> AutoPolicy {
        AutoPolicy::new(
            self.auto_long_source_chars,
            self.auto_english_max_length,
            self.short_max_length,
        )
    }

    pub fn normalizer(&self) -> SlugNormalizer {
        SlugNormalizer::new()
            .with_policy(self.auto_policy())
            .with_default_strategy(self.default_strategy)
            .with_section(&self.section)
    }

    pub fn redirect_evaluator(&self) -> RedirectEvaluator {
        RedirectEvaluator::new(self.normalizer()).with_permanent(self.permanent_redirects)
    }
}

impl Default for Config {
    fn default() -> Self {
        let policy = AutoPolicy::default();
        Self {
            default_strategy: SlugStrategy::Auto,
            short_max_length: policy.short_max_len,
            auto_long_source_chars: policy.long_source_chars,
            auto_english_max_length: policy.english_max_len,
            section: DEFAULT_SECTION.to_string(),
            default_locale: Locale::default_locale(),
            permanent_redirects: true,
        }
    }
}

/// A section is one or more path segments; blank segments are dropped.
fn parse_section(value: &str) -> std::result::Result<String, SlugError> {
    let parts: Vec<&str> = value.split('/').map(str::trim).filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return Err(SlugError::InvalidConfig(format!(
            "section '{}' has no path segment",
            value
        )));
    }
    if let Some(part) = parts.iter().find(|p| p.chars().any(|c| c.is_whitespace() || c == '%')) {
        return Err(SlugError::InvalidConfig(format!(
            "section segment '{}' must not contain whitespace or '%'",
            part
        )));
    }
    Ok(parts.join("/"))
}

fn parse_bool(value: &str) -> std::result::Result<bool, SlugError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SlugError::InvalidConfig(format!(
            "expected a boolean, got '{}'",
            other
        ))),
    }
}
