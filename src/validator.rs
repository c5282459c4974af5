//! Variant set validation.
//!
//! Checks that every generated path keeps the clean-URL guarantees before it
//! is published in a sitemap or redirect table.

use crate::slug::{is_clean, path_prefix, VariantSet, NUMERIC_LENGTH};

/// English slugs longer than this still work but read badly in a URL bar.
const ENGLISH_WARN_LEN: usize = 80;

/// Validation report containing errors and warnings about a variant set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Violations of the clean-URL guarantees
    pub errors: Vec<String>,

    /// Non-critical issues such as overlong slugs
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for generated variant sets.
pub struct VariantValidator;

impl VariantValidator {
    /// Validate a variant set built for `locale` under `section`.
    ///
    /// Errors: a path without the `/{locale}/{section}/` prefix, a slug that
    /// is empty or not clean, a numeric token of the wrong length.
    /// Warnings: a short slug over `short_max_len`, an English slug over 80
    /// characters.
    pub fn validate(
        set: &VariantSet,
        locale: &str,
        section: &str,
        short_max_len: usize,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        let prefix = path_prefix(locale, section);

        if !set.original.starts_with(&prefix) {
            report
                .errors
                .push(format!("original: missing prefix {} in {}", prefix, set.original));
        }

        let variants = [
            ("clean", &set.clean),
            ("english", &set.english),
            ("numeric", &set.numeric),
            ("short", &set.short),
            ("auto", &set.auto),
        ];

        for (name, path) in variants {
            let Some(slug) = path.strip_prefix(&prefix) else {
                report
                    .errors
                    .push(format!("{}: missing prefix {} in {}", name, prefix, path));
                continue;
            };

            if slug.is_empty() {
                report.errors.push(format!("{}: empty slug", name));
            } else if !is_clean(slug) {
                report
                    .errors
                    .push(format!("{}: '{}' is not a clean slug", name, slug));
            }

            match name {
                "numeric" if slug.len() != NUMERIC_LENGTH => report.errors.push(format!(
                    "numeric: expected {} chars, got {}",
                    NUMERIC_LENGTH,
                    slug.len()
                )),
                "short" if slug.len() > short_max_len => report.warnings.push(format!(
                    "short: {} chars exceeds limit of {}",
                    slug.len(),
                    short_max_len
                )),
                "english" if slug.len() > ENGLISH_WARN_LEN => report.warnings.push(format!(
                    "english: {} chars, consider the short variant",
                    slug.len()
                )),
                _ => {}
            }
        }

        report
    }
}
