//! The site's locales, as one static table.
//!
//! Locale codes double as the first path segment (`/zh-Hant/blog/...`).

use std::sync::OnceLock;

use crate::i18n::Locale;

/// One row of the locale table.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Path prefix and BCP 47 tag, e.g. `zh-Hant`
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    /// Fallback for unknown or missing locales
    pub is_default: bool,
    pub enabled: bool,
}

const LOCALES: &[LocaleConfig] = &[
    LocaleConfig {
        code: "en",
        name: "English",
        native_name: "English",
        is_default: true,
        enabled: true,
    },
    LocaleConfig {
        code: "vi",
        name: "Vietnamese",
        native_name: "Tiếng Việt",
        is_default: false,
        enabled: true,
    },
    LocaleConfig {
        code: "zh-Hant",
        name: "Traditional Chinese",
        native_name: "繁體中文",
        is_default: false,
        enabled: true,
    },
    LocaleConfig {
        code: "zh-Hans",
        name: "Simplified Chinese",
        native_name: "简体中文",
        is_default: false,
        enabled: true,
    },
];

/// Read-only view over the locale table.
pub struct LocaleRegistry {
    locales: &'static [LocaleConfig],
    default_index: usize,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry::from_table(LOCALES))
    }

    /// # Panics
    /// If the table does not mark exactly one locale as the default.
    fn from_table(locales: &'static [LocaleConfig]) -> Self {
        let mut defaults = locales
            .iter()
            .enumerate()
            .filter(|(_, locale)| locale.is_default)
            .map(|(index, _)| index);

        let default_index = match (defaults.next(), defaults.next()) {
            (Some(index), None) => index,
            (None, _) => panic!("locale table has no default entry"),
            (Some(_), Some(_)) => panic!("locale table has more than one default entry"),
        };

        Self {
            locales,
            default_index,
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn get_by_code(&self, code: &str) -> Option<&'static LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    pub fn list_enabled(&self) -> Vec<&'static LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    pub fn list_all(&self) -> Vec<&'static LocaleConfig> {
        self.locales.iter().collect()
    }

    pub fn default_locale(&self) -> &'static LocaleConfig {
        &self.locales[self.default_index]
    }

    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code).is_some_and(|locale| locale.enabled)
    }

    /// Detect the locale from the first segment of a request path.
    ///
    /// Only enabled locales are recognized; `/zh-Hant/blog/x` yields
    /// `zh-Hant`, while `/blog/x` and `/fr/blog/x` yield `None`.
    pub fn detect_from_path(&self, path: &str) -> Option<Locale> {
        let first = path.trim_start_matches('/').split('/').next()?;
        self.get_by_code(first)
            .filter(|config| config.enabled)
            .and_then(|config| Locale::from_code(config.code).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_traditional_chinese() {
        let config = LocaleRegistry::get()
            .get_by_code("zh-Hant")
            .expect("zh-Hant should exist");

        assert_eq!(config.name, "Traditional Chinese");
        assert_eq!(config.native_name, "繁體中文");
        assert!(!config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_is_case_sensitive() {
        assert!(LocaleRegistry::get().get_by_code("zh-hant").is_none());
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LocaleRegistry::get().get_by_code("fr").is_none());
    }

    #[test]
    fn test_list_enabled_contains_all_four() {
        let enabled = LocaleRegistry::get().list_enabled();

        assert_eq!(enabled.len(), 4);
        for code in ["en", "vi", "zh-Hant", "zh-Hans"] {
            assert!(enabled.iter().any(|locale| locale.code == code));
        }
        assert_eq!(LocaleRegistry::get().list_all().len(), 4);
    }

    #[test]
    fn test_default_locale_is_english() {
        let default = LocaleRegistry::get().default_locale();
        assert_eq!(default.code, "en");
        assert!(default.is_default);
    }

    #[test]
    fn test_is_enabled() {
        let registry = LocaleRegistry::get();
        assert!(registry.is_enabled("vi"));
        assert!(!registry.is_enabled("fr"));
    }

    const VI: LocaleConfig = LocaleConfig {
        code: "vi",
        name: "Vietnamese",
        native_name: "Tiếng Việt",
        is_default: false,
        enabled: true,
    };

    #[test]
    #[should_panic(expected = "no default entry")]
    fn test_table_without_default_panics() {
        const TABLE: &[LocaleConfig] = &[VI];
        LocaleRegistry::from_table(TABLE);
    }

    #[test]
    #[should_panic(expected = "more than one default entry")]
    fn test_table_with_two_defaults_panics() {
        const DEFAULT_VI: LocaleConfig = LocaleConfig {
            is_default: true,
            ..VI
        };
        const TABLE: &[LocaleConfig] = &[DEFAULT_VI, DEFAULT_VI];
        LocaleRegistry::from_table(TABLE);
    }

    // ==================== Path Detection Tests ====================

    #[test]
    fn test_detect_from_path() {
        let registry = LocaleRegistry::get();

        assert_eq!(
            registry.detect_from_path("/zh-Hant/blog/post").map(|l| l.code()),
            Some("zh-Hant")
        );
        assert_eq!(registry.detect_from_path("/vi").map(|l| l.code()), Some("vi"));
        assert!(registry.detect_from_path("/blog/post").is_none());
        assert!(registry.detect_from_path("/fr/blog/post").is_none());
        assert!(registry.detect_from_path("").is_none());
    }
}
