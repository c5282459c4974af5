use thiserror::Error;

/// Errors raised by the slug library.
///
/// Redirect evaluation never surfaces these to callers: a malformed path is
/// simply not rewritten.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlugError {
    #[error("malformed percent-encoding in `{segment}`")]
    MalformedEncoding { segment: String },
    #[error("unknown locale code: '{0}'")]
    UnknownLocale(String),
    #[error("locale '{0}' is not enabled")]
    DisabledLocale(String),
    #[error("unknown slug strategy: '{0}' (expected english, numeric, short or auto)")]
    UnknownStrategy(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
