use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use refgraph_cache::Cache;
use refgraph_types::{decode_json, decoder, DecodeFn, RawValue, ResolveError, ResolveResult, Url};

/// A URL paired with the decoder for the value stored there.
///
/// Cloning is cheap: the decoder is shared. Two references compare equal
/// when their URLs are equal, whatever decoders they carry.
pub struct Reference<T> {
    url: Url,
    decode: DecodeFn<T>,
}

impl<T: DeserializeOwned + 'static> Reference<T> {
    /// A reference decoded with `T`'s `Deserialize` implementation.
    pub fn new(url: impl Into<Url>) -> Self {
        Self::with_decoder(decoder(decode_json::<T>), url)
    }
}

impl<T> Reference<T> {
    /// A reference decoded with a custom decoder.
    pub fn with_decoder(decode: DecodeFn<T>, url: impl Into<Url>) -> Self {
        Self {
            url: url.into(),
            decode,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The decoder this reference applies.
    pub fn decoder(&self) -> &DecodeFn<T> {
        &self.decode
    }

    /// Look up this reference's URL in `cache` and decode the value.
    ///
    /// Nested references inside the decoded value are returned as they are.
    pub fn resolve(&self, cache: &Cache) -> ResolveResult<T> {
        let raw = cache
            .get(self.url.as_str())
            .ok_or_else(|| ResolveError::not_found(&self.url))?;
        (self.decode)(raw).map_err(|message| ResolveError::decoding_failed(&self.url, message))
    }
}

impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            decode: self.decode.clone(),
        }
    }
}

impl<T> PartialEq for Reference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl<T> Eq for Reference<T> {}

impl<T> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reference").field(&self.url).finish()
    }
}

/// A reference serializes as its bare URL string.
impl<T> Serialize for Reference<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.url.serialize(serializer)
    }
}

/// A bare URL string deserializes into a [`Reference::new`].
impl<'de, T: DeserializeOwned + 'static> Deserialize<'de> for Reference<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Url::deserialize(deserializer).map(Reference::new)
    }
}

/// Build a reference. No lookup happens until it is resolved.
pub fn create<T>(decode: DecodeFn<T>, url: impl Into<Url>) -> Reference<T> {
    Reference::with_decoder(decode, url)
}

/// Resolve `reference` against `cache`.
pub fn resolve<T>(reference: &Reference<T>, cache: &Cache) -> ResolveResult<T> {
    reference.resolve(cache)
}

/// A decoder reading a raw JSON string as the URL of a `T`.
///
/// The returned decoder performs no lookup; every reference it produces
/// shares `decode`.
pub fn decode_as_reference<T>(
    decode: DecodeFn<T>,
) -> impl Fn(&RawValue) -> Result<Reference<T>, String> + Clone {
    move |raw: &RawValue| match raw {
        RawValue::String(url) => Ok(create(decode.clone(), url.as_str())),
        other => Err(format!("expected a URL string, found {}", type_name(other))),
    }
}

fn type_name(value: &RawValue) -> &'static str {
    match value {
        RawValue::Null => "null",
        RawValue::Bool(_) => "a boolean",
        RawValue::Number(_) => "a number",
        RawValue::String(_) => "a string",
        RawValue::Array(_) => "an array",
        RawValue::Object(_) => "an object",
    }
}
