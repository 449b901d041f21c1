//! Typed references into a refgraph cache.
//!
//! A [`Reference<T>`] names the URL of a value and carries the decoder that
//! turns the raw JSON at that URL into a `T`. It holds no connection to any
//! cache: resolving is always explicit, against a snapshot the caller picks.
//!
//! References found inside a decoded value are not followed automatically.
//! Linking a whole object graph is the job of `refgraph-loader`.
//!
//! # Modules
//!
//! - [`reference`] — [`Reference`], [`resolve`], [`decode_as_reference`]

pub mod reference;

pub use reference::{create, decode_as_reference, resolve, Reference};
