//! Locale type: a code validated against the registry.

use std::fmt;

use serde::Serialize;

use crate::error::SlugError;
use crate::i18n::{LocaleConfig, LocaleRegistry};

/// A locale known to the registry and enabled for serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const ENGLISH: Locale = Locale { code: "en" };
    pub const VIETNAMESE: Locale = Locale { code: "vi" };
    pub const TRADITIONAL_CHINESE: Locale = Locale { code: "zh-Hant" };
    pub const SIMPLIFIED_CHINESE: Locale = Locale { code: "zh-Hans" };

    /// Create a locale from its code.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered and enabled
    /// * `Err(SlugError::UnknownLocale)` if the code is not registered
    /// * `Err(SlugError::DisabledLocale)` if the locale is switched off
    pub fn from_code(code: &str) -> Result<Locale, SlugError> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale { code: config.code }),
            Some(_) => Err(SlugError::DisabledLocale(code.to_string())),
            None => Err(SlugError::UnknownLocale(code.to_string())),
        }
    }

    /// Look up a locale, falling back to the default locale when the code is
    /// unknown or disabled.
    pub fn from_code_or_default(code: &str) -> Locale {
        Self::from_code(code).unwrap_or_else(|_| Self::default_locale())
    }

    /// The registry's fallback locale.
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full registry entry for this locale.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a `Locale` built through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be registered")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::default_locale()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_constants_are_registered() {
        for locale in [
            Locale::ENGLISH,
            Locale::VIETNAMESE,
            Locale::TRADITIONAL_CHINESE,
            Locale::SIMPLIFIED_CHINESE,
        ] {
            assert_eq!(Locale::from_code(locale.code()), Ok(locale));
        }
    }

    #[test]
    fn test_english_is_default() {
        assert!(Locale::ENGLISH.is_default());
        assert!(!Locale::VIETNAMESE.is_default());
        assert_eq!(Locale::default(), Locale::ENGLISH);
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_simplified_chinese() {
        let locale = Locale::from_code("zh-Hans").expect("Should succeed");
        assert_eq!(locale.name(), "Simplified Chinese");
        assert_eq!(locale.native_name(), "简体中文");
    }

    #[test]
    fn test_from_code_unknown() {
        let result = Locale::from_code("fr");
        assert_eq!(result, Err(SlugError::UnknownLocale("fr".to_string())));
        assert!(result.unwrap_err().to_string().contains("unknown locale"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Locale::from_code("").is_err());
    }

    #[test]
    fn test_from_code_or_default_falls_back() {
        assert_eq!(Locale::from_code_or_default("fr"), Locale::ENGLISH);
        assert_eq!(Locale::from_code_or_default("vi"), Locale::VIETNAMESE);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display_is_code() {
        assert_eq!(Locale::TRADITIONAL_CHINESE.to_string(), "zh-Hant");
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Locale::VIETNAMESE).expect("serialize");
        assert_eq!(json, "\"vi\"");
    }
}
