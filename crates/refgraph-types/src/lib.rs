//! Foundation types for refgraph.
//!
//! Every other refgraph crate depends on `refgraph-types`.
//!
//! # Key Types
//!
//! - [`Url`] — Opaque key identifying one stored JSON value
//! - [`RawValue`] — Untyped JSON value held by the cache
//! - [`ResolveError`] — Why a URL could not be turned into a typed value
//! - [`DecodeFn`] — Shareable decoder from a [`RawValue`] to a typed value

pub mod decode;
pub mod error;
pub mod url;

pub use decode::{decode_json, decoder, DecodeFn, RawValue};
pub use error::{ResolveError, ResolveResult, DEFAULT_DECODE_MESSAGE};
pub use url::Url;
