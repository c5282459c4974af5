//! Redirect rules for blog paths that carry non-ASCII or percent-encoded
//! slugs.
//!
//! The evaluator only decides; issuing the HTTP response belongs to the
//! router. Evaluation never fails: a path it cannot make sense of is left
//! alone.

use std::collections::HashSet;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SlugError;
use crate::slug::{is_clean, needs_rewriting, SlugNormalizer};

// https://url.spec.whatwg.org/#path-percent-encode-set, plus the characters
// that would end or split a single path segment
const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');
const SEGMENT: &AsciiSet = &FRAGMENT
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Outcome of evaluating one request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RedirectDecision {
    NoRedirect,
    Redirect { location: String, permanent: bool },
}

impl RedirectDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, RedirectDecision::Redirect { .. })
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            RedirectDecision::Redirect { location, .. } => Some(location),
            RedirectDecision::NoRedirect => None,
        }
    }
}

/// One entry of a static redirect table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedirectRule {
    /// Percent-encoded legacy path
    pub source: String,
    pub destination: String,
    pub permanent: bool,
}

/// Decides whether blog paths should be redirected to their clean form.
#[derive(Debug, Clone)]
pub struct RedirectEvaluator {
    normalizer: SlugNormalizer,
    permanent: bool,
}

impl RedirectEvaluator {
    pub fn new(normalizer: SlugNormalizer) -> Self {
        Self {
            normalizer,
            permanent: true,
        }
    }

    pub fn with_permanent(mut self, permanent: bool) -> Self {
        self.permanent = permanent;
        self
    }

    pub fn normalizer(&self) -> &SlugNormalizer {
        &self.normalizer
    }

    /// Evaluate an incoming request path (no query string).
    ///
    /// Only `/{locale}/{section}/{segment}` paths are considered, with an
    /// optional trailing slash. A segment is rewritten when its decoded form
    /// needs rewriting, or when it arrived percent-encoded and its canonical
    /// form differs. Redirect locations always evaluate to `NoRedirect`.
    pub fn evaluate(&self, path: &str) -> RedirectDecision {
        let Some((locale, segment)) = self.split_blog_path(path) else {
            return RedirectDecision::NoRedirect;
        };

        let decoded = match decode_segment(segment) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Leaving {} unchanged: {}", path, e);
                return RedirectDecision::NoRedirect;
            }
        };

        let canonical = if needs_rewriting(&decoded) {
            self.normalizer.clean_slug(&decoded)
        } else if segment.contains('%') {
            if is_clean(&decoded) {
                decoded
            } else {
                self.normalizer.clean_slug(&decoded)
            }
        } else {
            return RedirectDecision::NoRedirect;
        };

        if canonical == segment {
            return RedirectDecision::NoRedirect;
        }

        let location = self.normalizer.path(locale, &canonical);
        debug!("Redirecting {} -> {}", path, location);
        RedirectDecision::Redirect {
            location,
            permanent: self.permanent,
        }
    }

    /// Build a redirect table for every slug that needs rewriting, in every
    /// locale. Sources are percent-encoded; duplicates are dropped and the
    /// first occurrence wins.
    pub fn redirect_rules<S: AsRef<str>>(&self, slugs: &[S], locales: &[&str]) -> Vec<RedirectRule> {
        let mut seen = HashSet::new();
        let mut rules = Vec::new();

        for slug in slugs {
            let slug = slug.as_ref();
            if !needs_rewriting(slug) {
                continue;
            }
            for locale in locales {
                let source = self.normalizer.path(locale, &encode_segment(slug));
                if !seen.insert(source.clone()) {
                    continue;
                }
                rules.push(RedirectRule {
                    source,
                    destination: self.normalizer.clean_path(slug, locale, None),
                    permanent: self.permanent,
                });
            }
        }

        debug!("Built {} redirect rules from {} slugs", rules.len(), slugs.len());
        rules
    }

    fn split_blog_path<'a>(&self, path: &'a str) -> Option<(&'a str, &'a str)> {
        let rest = path.strip_prefix('/')?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let (locale, rest) = rest.split_once('/')?;

        let section = self.normalizer.section();
        let segment = if section.is_empty() {
            rest
        } else {
            rest.strip_prefix(section)?.strip_prefix('/')?
        };

        if locale.is_empty() || segment.is_empty() || segment.contains('/') {
            return None;
        }
        Some((locale, segment))
    }
}

impl Default for RedirectEvaluator {
    fn default() -> Self {
        Self::new(SlugNormalizer::default())
    }
}

/// Strictly percent-decode one path segment.
///
/// A `%` not followed by two hex digits, or bytes that do not decode to
/// UTF-8, are a [`SlugError::MalformedEncoding`].
pub fn decode_segment(segment: &str) -> Result<String, SlugError> {
    let malformed = || SlugError::MalformedEncoding {
        segment: segment.to_string(),
    };

    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape_ok = bytes
                .get(i + 1..i + 3)
                .map(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .unwrap_or(false);
            if !escape_ok {
                return Err(malformed());
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| malformed())
}

/// Percent-encode a raw slug for use as one path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
