//! Locale negotiation for requests that arrive without a locale prefix.

use crate::i18n::{Locale, LocaleRegistry};

/// Pick the best locale for an `Accept-Language` header value.
///
/// Language ranges are tried in descending quality order (ties keep header
/// order). Chinese ranges map on script or region: `zh-Hant`, `zh-TW`,
/// `zh-HK` and `zh-MO` select Traditional, any other `zh` range selects
/// Simplified. Ranges with `q=0` are ignored. Falls back to the default
/// locale.
pub fn negotiate(accept_language: &str) -> Locale {
    let mut ranges: Vec<(&str, f32)> = accept_language
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let quality = pieces
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((tag, quality))
        })
        .filter(|(_, quality)| *quality > 0.0)
        .collect();

    // Stable sort keeps header order among equal weights
    ranges.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranges
        .into_iter()
        .find_map(|(tag, _)| match_range(tag))
        .unwrap_or_else(Locale::default_locale)
}

fn match_range(tag: &str) -> Option<Locale> {
    let lower = tag.to_ascii_lowercase();
    let mut subtags = lower.split(['-', '_']);
    let primary = subtags.next()?;

    let locale = match primary {
        "zh" => {
            let traditional = subtags.any(|sub| matches!(sub, "hant" | "tw" | "hk" | "mo"));
            if traditional {
                Locale::TRADITIONAL_CHINESE
            } else {
                Locale::SIMPLIFIED_CHINESE
            }
        }
        "vi" => Locale::VIETNAMESE,
        "en" => Locale::ENGLISH,
        _ => return None,
    };

    LocaleRegistry::get()
        .is_enabled(locale.code())
        .then_some(locale)
}

/// Prefix a path with a locale unless it already carries one.
///
/// ```
/// use slug_cleanup::i18n::{localize_path, Locale};
///
/// assert_eq!(localize_path("/blog/post", Locale::VIETNAMESE), "/vi/blog/post");
/// assert_eq!(localize_path("/en/blog/post", Locale::VIETNAMESE), "/en/blog/post");
/// ```
pub fn localize_path(path: &str, locale: Locale) -> String {
    if LocaleRegistry::get().detect_from_path(path).is_some() {
        return path.to_string();
    }

    let rest = path.trim_start_matches('/');
    if rest.is_empty() {
        format!("/{}", locale.code())
    } else {
        format!("/{}/{}", locale.code(), rest)
    }
}
