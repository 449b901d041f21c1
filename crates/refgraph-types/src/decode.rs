//! Decoders turning a cached [`RawValue`] into a typed value.
//!
//! A decoder reports structural mismatches as a plain message. The caller
//! pairs that message with the URL it was decoding to build a
//! [`ResolveError::DecodingFailed`](crate::ResolveError::DecodingFailed).

use std::sync::Arc;

use serde::de::DeserializeOwned;

/// Untyped JSON value stored in the cache.
pub type RawValue = serde_json::Value;

/// A shareable decoder value.
pub type DecodeFn<T> = Arc<dyn Fn(&RawValue) -> Result<T, String> + Send + Sync>;

/// Decode a raw value with its serde `Deserialize` implementation.
///
/// The error message is serde_json's description of the first mismatch
/// (missing field, wrong type, ...). It is never empty and is the same for
/// identical inputs.
pub fn decode_json<T: DeserializeOwned>(value: &RawValue) -> Result<T, String> {
    T::deserialize(value).map_err(|e| e.to_string())
}

/// Box a decoding function into a [`DecodeFn`].
pub fn decoder<T, F>(f: F) -> DecodeFn<T>
where
    F: Fn(&RawValue) -> Result<T, String> + Send + Sync + 'static,
{
    Arc::new(f)
}
