use thiserror::Error;

use crate::url::Url;

/// Message used when a decoder rejects a value without saying why.
pub const DEFAULT_DECODE_MESSAGE: &str = "value rejected by decoder";

/// Errors produced when resolving a URL against a cache snapshot.
///
/// Every variant carries the URL it concerns. Resolution stops at the first
/// error; no partially linked value is ever returned alongside one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No value exists at this URL in the snapshot.
    #[error("no value at {url}")]
    NotFound { url: Url },

    /// A value exists but does not have the expected shape.
    #[error("failed to decode {url}: {message}")]
    DecodingFailed { url: Url, message: String },

    /// The URL was reached again while it was still being resolved.
    #[error("cyclic reference through {url}")]
    CyclicReference { url: Url },

    /// The reference chain leading to this URL is longer than allowed.
    #[error("reference depth limit {limit} exceeded at {url}")]
    DepthExceeded { url: Url, limit: usize },
}

impl ResolveError {
    pub fn not_found(url: impl Into<Url>) -> Self {
        Self::NotFound { url: url.into() }
    }

    /// An empty decoder message is replaced by [`DEFAULT_DECODE_MESSAGE`].
    pub fn decoding_failed(url: impl Into<Url>, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = DEFAULT_DECODE_MESSAGE.to_string();
        }
        Self::DecodingFailed {
            url: url.into(),
            message,
        }
    }

    /// The URL this error concerns.
    pub fn url(&self) -> &Url {
        match self {
            Self::NotFound { url }
            | Self::DecodingFailed { url, .. }
            | Self::CyclicReference { url }
            | Self::DepthExceeded { url, .. } => url,
        }
    }

    /// Returns `true` if this is a [`ResolveError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a [`ResolveError::DecodingFailed`].
    pub fn is_decoding_failed(&self) -> bool {
        matches!(self, Self::DecodingFailed { .. })
    }
}

/// Result alias for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
