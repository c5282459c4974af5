//! Slug normalization: turn a CMS title slug into a clean URL segment.
//!
//! A clean segment contains only lowercase ASCII letters, digits and single
//! hyphens between them. Four strategies produce one:
//!
//! - `english`: dictionary transliteration (`越南語` → `vietnamese`)
//! - `numeric`: 8-char base-36 token derived from a SHA-256 of the slug
//! - `short`: `english` cut at a hyphen so it fits a length cap
//! - `auto`: picks one of the above by [`AutoPolicy`]
//!
//! Every strategy is a pure function of the sanitized slug, so the same post
//! always gets the same URL and redirect tables stay stable across builds.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::dictionary;
use crate::error::SlugError;

/// Length of the numeric token.
pub const NUMERIC_LENGTH: usize = 8;

/// Path section that blog posts live under.
pub const DEFAULT_SECTION: &str = "blog";

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static CLEAN_REGEX: OnceLock<Regex> = OnceLock::new();

/// Strategy used to derive a clean slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugStrategy {
    English,
    Numeric,
    Short,
    Auto,
}

impl SlugStrategy {
    pub const ALL: [SlugStrategy; 4] = [
        SlugStrategy::English,
        SlugStrategy::Numeric,
        SlugStrategy::Short,
        SlugStrategy::Auto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlugStrategy::English => "english",
            SlugStrategy::Numeric => "numeric",
            SlugStrategy::Short => "short",
            SlugStrategy::Auto => "auto",
        }
    }
}

impl fmt::Display for SlugStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlugStrategy {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SlugError::UnknownStrategy(s.to_string()))
    }
}

/// Thresholds for the `auto` strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoPolicy {
    /// Sources longer than this many chars get the numeric token
    pub long_source_chars: usize,
    /// Longest English slug `auto` accepts as-is
    pub english_max_len: usize,
    /// Length cap for the `short` strategy
    pub short_max_len: usize,
}

impl AutoPolicy {
    pub fn new(long_source_chars: usize, english_max_len: usize, short_max_len: usize) -> Self {
        Self {
            long_source_chars,
            english_max_len,
            short_max_len,
        }
    }

    pub fn with_long_source_chars(mut self, chars: usize) -> Self {
        self.long_source_chars = chars;
        self
    }

    pub fn with_english_max_len(mut self, len: usize) -> Self {
        self.english_max_len = len;
        self
    }

    pub fn with_short_max_len(mut self, len: usize) -> Self {
        self.short_max_len = len;
        self
    }

    /// Pick the clean slug for `raw`.
    ///
    /// 1. Already-clean input is returned unchanged.
    /// 2. Input with no transliterable content gets the numeric token.
    /// 3. Input longer than `long_source_chars` gets the numeric token.
    /// 4. Input with word separators whose English form fits
    ///    `english_max_len` gets the English slug.
    /// 5. Anything else gets the short slug.
    pub fn apply(&self, raw: &str) -> String {
        let sanitized = sanitize(raw);
        if is_clean(&sanitized) {
            return sanitized;
        }

        let english = to_english(&sanitized);
        if english.is_empty() {
            debug!("auto: no transliteration for {:?}, using numeric", sanitized);
            return to_numeric(&sanitized);
        }

        if sanitized.chars().count() > self.long_source_chars {
            debug!(
                "auto: source is {} chars (> {}), using numeric",
                sanitized.chars().count(),
                self.long_source_chars
            );
            return to_numeric(&sanitized);
        }

        if has_separator(&sanitized) && english.len() <= self.english_max_len {
            return english;
        }

        to_short(&sanitized, self.short_max_len)
    }
}

impl Default for AutoPolicy {
    fn default() -> Self {
        Self::new(40, 60, 30)
    }
}

/// All path forms of one slug, each prefixed with `/{locale}/{section}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSet {
    /// The raw slug as the CMS produced it
    pub original: String,
    /// The normalizer's default strategy
    pub clean: String,
    pub english: String,
    pub numeric: String,
    pub short: String,
    pub auto: String,
}

/// One row of a variant comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSummary {
    pub strategy: SlugStrategy,
    pub path: String,
    /// Length of the slug segment, in chars
    pub length: usize,
    pub url_safe: bool,
}

/// Strategy-aware normalizer that also knows how to build paths.
#[derive(Debug, Clone)]
pub struct SlugNormalizer {
    policy: AutoPolicy,
    default_strategy: SlugStrategy,
    section: String,
}

impl SlugNormalizer {
    pub fn new() -> Self {
        Self {
            policy: AutoPolicy::default(),
            default_strategy: SlugStrategy::Auto,
            section: DEFAULT_SECTION.to_string(),
        }
    }

    pub fn with_policy(mut self, policy: AutoPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_default_strategy(mut self, strategy: SlugStrategy) -> Self {
        self.default_strategy = strategy;
        self
    }

    /// Set the path section (`blog` by default).
    ///
    /// Nested sections such as `news/2024` are allowed; empty segments are
    /// dropped, so `/` leaves the section empty and posts sit directly under
    /// the locale.
    pub fn with_section(mut self, section: &str) -> Self {
        self.section = normalize_section(section);
        self
    }

    pub fn policy(&self) -> &AutoPolicy {
        &self.policy
    }

    pub fn default_strategy(&self) -> SlugStrategy {
        self.default_strategy
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    /// Clean slug for `raw` under `strategy`. Never empty.
    pub fn slug(&self, raw: &str, strategy: SlugStrategy) -> String {
        match strategy {
            SlugStrategy::English => {
                let english = to_english(raw);
                if english.is_empty() {
                    to_numeric(raw)
                } else {
                    english
                }
            }
            SlugStrategy::Numeric => to_numeric(raw),
            SlugStrategy::Short => to_short(raw, self.policy.short_max_len),
            SlugStrategy::Auto => self.policy.apply(raw),
        }
    }

    /// Clean slug under the default strategy.
    pub fn clean_slug(&self, raw: &str) -> String {
        self.slug(raw, self.default_strategy)
    }

    /// `/{locale}/{section}/{segment}`. The locale is used verbatim.
    pub fn path(&self, locale: &str, segment: &str) -> String {
        format!("{}{}", path_prefix(locale, &self.section), segment)
    }

    /// Path for page rendering: `None` selects the default strategy.
    pub fn clean_path(&self, raw: &str, locale: &str, strategy: Option<SlugStrategy>) -> String {
        let strategy = strategy.unwrap_or(self.default_strategy);
        self.path(locale, &self.slug(raw, strategy))
    }

    pub fn build_variant_set(&self, raw: &str, locale: &str) -> VariantSet {
        VariantSet {
            original: self.path(locale, raw),
            clean: self.clean_path(raw, locale, None),
            english: self.clean_path(raw, locale, Some(SlugStrategy::English)),
            numeric: self.clean_path(raw, locale, Some(SlugStrategy::Numeric)),
            short: self.clean_path(raw, locale, Some(SlugStrategy::Short)),
            auto: self.clean_path(raw, locale, Some(SlugStrategy::Auto)),
        }
    }

    /// Side-by-side view of every strategy for one slug.
    pub fn compare_variants(&self, raw: &str, locale: &str) -> Vec<VariantSummary> {
        SlugStrategy::ALL
            .into_iter()
            .map(|strategy| {
                let slug = self.slug(raw, strategy);
                VariantSummary {
                    strategy,
                    path: self.path(locale, &slug),
                    length: slug.chars().count(),
                    url_safe: is_clean(&slug),
                }
            })
            .collect()
    }
}

impl Default for SlugNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// `/{locale}/{section}/`, or `/{locale}/` when the section is empty.
pub fn path_prefix(locale: &str, section: &str) -> String {
    let section = normalize_section(section);
    if section.is_empty() {
        format!("/{}/", locale)
    } else {
        format!("/{}/{}/", locale, section)
    }
}

fn normalize_section(section: &str) -> String {
    section
        .split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Zero-width and bidi-control marks that CMS editors paste into titles.
fn is_invisible(ch: char) -> bool {
    matches!(
        ch,
        '\u{200B}'..='\u{200D}'
            | '\u{FEFF}'
            | '\u{2060}'
            | '\u{200E}'
            | '\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2069}'
    )
}

fn is_cjk_ideograph(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch)
}

fn has_separator(text: &str) -> bool {
    text.chars().any(|ch| {
        ch.is_whitespace()
            || matches!(
                ch,
                '-' | '_'
                    | '|'
                    | '｜'
                    | '?'
                    | '？'
                    | ','
                    | '，'
                    | '、'
                    | ':'
                    | '：'
                    | '/'
                    | '.'
                    | '。'
                    | '!'
                    | '！'
            )
    })
}

/// Strip invisible marks, collapse whitespace runs to one space, and trim.
///
/// ```
/// use slug_cleanup::slug::sanitize;
///
/// assert_eq!(sanitize("  越南\u{2069}語 \t 課程 "), "越南語 課程");
/// ```
pub fn sanitize(raw: &str) -> String {
    let visible: String = raw.chars().filter(|ch| !is_invisible(*ch)).collect();
    visible.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `slug` is already a clean URL segment.
pub fn is_clean(slug: &str) -> bool {
    let regex = CLEAN_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("clean slug pattern is valid")
    });
    regex.is_match(slug)
}

/// Whether a slug contains CJK ideographs or the full-width `｜`/`？`
/// separators, and so should not appear in a URL as-is.
pub fn needs_rewriting(slug: &str) -> bool {
    slug.chars()
        .any(|ch| is_cjk_ideograph(ch) || ch == '｜' || ch == '？')
}

/// Hyphen-joined English transliteration. Empty when nothing in `raw` can
/// be transliterated.
pub fn to_english(raw: &str) -> String {
    let folded: String = sanitize(raw).nfkc().collect();
    let chars: Vec<char> = folded.chars().collect();

    let mut tokens: Vec<String> = Vec::new();
    let mut word = String::new();

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];

        if ch.is_ascii_alphanumeric() {
            word.push(ch.to_ascii_lowercase());
            i += 1;
            continue;
        }

        if let Some((consumed, phrase)) = dictionary::longest_match(&chars, i) {
            flush(&mut word, &mut tokens);
            tokens.push(phrase.to_string());
            i += consumed;
            continue;
        }

        if let Some(token) = dictionary::pinyin_token(ch) {
            flush(&mut word, &mut tokens);
            tokens.push(token);
        } else if ch.is_alphabetic() {
            match dictionary::strip_accents(ch) {
                Some(base) => word.push_str(&base),
                None => flush(&mut word, &mut tokens),
            }
        } else {
            flush(&mut word, &mut tokens);
        }
        i += 1;
    }
    flush(&mut word, &mut tokens);

    tokens.join("-")
}

fn flush(word: &mut String, tokens: &mut Vec<String>) {
    if !word.is_empty() {
        tokens.push(std::mem::take(word));
    }
}

/// Fixed-length base-36 token derived from the sanitized slug.
///
/// The first 40 bits of the SHA-256 digest always fit in 8 base-36 digits.
pub fn to_numeric(raw: &str) -> String {
    let digest = Sha256::digest(sanitize(raw).as_bytes());
    let mut value = digest[..5]
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

    let mut token = ['0'; NUMERIC_LENGTH];
    for slot in token.iter_mut().rev() {
        *slot = BASE36[(value % 36) as usize] as char;
        value /= 36;
    }
    token.iter().collect()
}

/// English slug cut at the last hyphen that keeps it within `max_length`.
///
/// Falls back to the numeric token (cut to `max_length`) when not even the
/// first word fits. A `max_length` of 0 is treated as 1.
pub fn to_short(raw: &str, max_length: usize) -> String {
    let max_length = max_length.max(1);
    let english = to_english(raw);

    let mut short = String::new();
    for token in english.split('-').filter(|token| !token.is_empty()) {
        let needed = if short.is_empty() {
            token.len()
        } else {
            short.len() + 1 + token.len()
        };
        if needed > max_length {
            break;
        }
        if !short.is_empty() {
            short.push('-');
        }
        short.push_str(token);
    }

    if short.is_empty() {
        let mut numeric = to_numeric(raw);
        numeric.truncate(max_length);
        numeric
    } else {
        short
    }
}

/// `auto` strategy under the default [`AutoPolicy`].
pub fn to_auto(raw: &str) -> String {
    AutoPolicy::default().apply(raw)
}

/// Variant set under the default normalizer.
pub fn build_variant_set(raw: &str, locale: &str) -> VariantSet {
    SlugNormalizer::default().build_variant_set(raw, locale)
}
