//! Clean, locale-prefixed blog URLs for slugs written in Chinese and other
//! non-ASCII scripts.
//!
//! ```
//! use slug_cleanup::{needs_rewriting, RedirectDecision, RedirectEvaluator, SlugNormalizer};
//!
//! let normalizer = SlugNormalizer::default();
//! assert!(needs_rewriting("越南語｜發音"));
//! assert_eq!(
//!     normalizer.clean_path("越南語｜發音", "zh-Hant", None),
//!     "/zh-Hant/blog/vietnamese-pronunciation"
//! );
//!
//! let evaluator = RedirectEvaluator::new(normalizer);
//! assert_eq!(evaluator.evaluate("/en/blog/hello-world"), RedirectDecision::NoRedirect);
//! ```

pub mod catalog;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod i18n;
pub mod redirect;
pub mod slug;
pub mod validator;

pub use config::Config;
pub use error::SlugError;
pub use i18n::{Locale, LocaleRegistry};
pub use redirect::{RedirectDecision, RedirectEvaluator, RedirectRule};
pub use slug::{
    build_variant_set, is_clean, needs_rewriting, sanitize, to_auto, to_english, to_numeric,
    to_short, AutoPolicy, SlugNormalizer, SlugStrategy, VariantSet, VariantSummary,
};
pub use validator::{ValidationReport, VariantValidator};
