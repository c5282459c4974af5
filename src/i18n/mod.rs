//! Internationalization (i18n): the site's locales and locale routing.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for supported locales and their metadata
//! - `locale`: validated `Locale` type with default-locale fallback
//! - `negotiate`: `Accept-Language` negotiation and locale path prefixing
//!
//! Locales only ever prefix paths. Slug normalization is locale-agnostic.
//!
//! # Example
//!
//! ```rust
//! use slug_cleanup::i18n::{negotiate, Locale, LocaleRegistry};
//!
//! let locale = Locale::from_code("zh-Hant").unwrap();
//! assert_eq!(negotiate("zh-TW,en;q=0.5"), locale);
//! assert_eq!(LocaleRegistry::get().list_enabled().len(), 4);
//! ```

mod locale;
mod negotiate;
mod registry;

pub use locale::Locale;
pub use negotiate::{localize_path, negotiate};
pub use registry::{LocaleConfig, LocaleRegistry};
