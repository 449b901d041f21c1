//! The resolution context that links raw objects into a value graph.

use std::cell::RefCell;

use tracing::trace;

use refgraph_cache::Cache;
use refgraph_refs::Reference;
use refgraph_types::{RawValue, ResolveError, ResolveResult, Url};

use crate::config::LoaderConfig;
use crate::remote::Remote;

/// Loads values and their nested references from one cache snapshot.
///
/// A loader borrows the snapshot for its whole lifetime and never writes to
/// it. Resolvers receive the loader and recurse through it, which is how it
/// keeps track of the chain of URLs currently being loaded.
///
/// Loading is synchronous and single-threaded; a loader is not `Sync`.
#[derive(Debug)]
pub struct Loader<'a> {
    cache: &'a Cache,
    config: LoaderConfig,
    path: RefCell<Vec<Url>>,
}

impl<'a> Loader<'a> {
    /// A loader with the default guards.
    pub fn new(cache: &'a Cache) -> Self {
        Self::with_config(cache, LoaderConfig::default())
    }

    pub fn with_config(cache: &'a Cache, config: LoaderConfig) -> Self {
        Self {
            cache,
            config,
            path: RefCell::new(Vec::new()),
        }
    }

    /// The snapshot this loader reads from.
    pub fn cache(&self) -> &'a Cache {
        self.cache
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Number of loads currently in flight.
    pub fn depth(&self) -> usize {
        self.path.borrow().len()
    }

    /// Load the value at `url`, decode it into a raw object and link it with
    /// `resolve`.
    ///
    /// Fails with `NotFound` if the URL is absent and with `DecodingFailed`
    /// if `decode` rejects the value. Errors from `resolve` are returned
    /// unchanged.
    pub fn load<R, T, D, F>(
        &self,
        decode: D,
        resolve: F,
        url: impl Into<Url>,
    ) -> ResolveResult<Remote<T>>
    where
        D: FnOnce(&RawValue) -> Result<R, String>,
        F: FnOnce(&Loader<'_>, R) -> ResolveResult<T>,
    {
        let url = url.into();
        let _entry = self.enter(&url)?;
        trace!(%url, depth = self.depth(), "loading");

        let raw = self
            .cache
            .get(url.as_str())
            .ok_or_else(|| ResolveError::not_found(&url))?;
        let raw = decode(raw).map_err(|message| ResolveError::decoding_failed(&url, message))?;
        let value = resolve(self, raw)?;
        Ok(Remote::new(url, value))
    }

    /// Load a value with no nested references: the decoded value is the
    /// result.
    pub fn load_raw<T, D>(&self, decode: D, url: impl Into<Url>) -> ResolveResult<Remote<T>>
    where
        D: FnOnce(&RawValue) -> Result<T, String>,
    {
        self.load(decode, |_, raw| Ok(raw), url)
    }

    /// Load every URL with `load`, in order.
    ///
    /// Stops at the first failure. On success the output has one entry per
    /// input URL, in input order.
    pub fn load_list<T, F, I>(&self, load: F, urls: I) -> ResolveResult<Vec<Remote<T>>>
    where
        F: Fn(&Loader<'_>, &Url) -> ResolveResult<Remote<T>>,
        I: IntoIterator,
        I::Item: Into<Url>,
    {
        urls.into_iter()
            .map(|url| {
                let url: Url = url.into();
                load(self, &url)
            })
            .collect()
    }

    /// Load the target of a typed reference with the reference's decoder.
    pub fn resolve<T>(&self, reference: &Reference<T>) -> ResolveResult<Remote<T>> {
        self.load_raw(|raw| (reference.decoder())(raw), reference.url())
    }

    /// Load the target of a reference to a raw object and link it with
    /// `resolve`.
    pub fn load_reference<R, T, F>(
        &self,
        reference: &Reference<R>,
        resolve: F,
    ) -> ResolveResult<Remote<T>>
    where
        F: FnOnce(&Loader<'_>, R) -> ResolveResult<T>,
    {
        self.load(|raw| (reference.decoder())(raw), resolve, reference.url())
    }

    fn enter(&self, url: &Url) -> ResolveResult<PathEntry<'_>> {
        let mut path = self.path.borrow_mut();
        if self.config.detect_cycles && path.contains(url) {
            return Err(ResolveError::CyclicReference { url: url.clone() });
        }
        if let Some(limit) = self.config.max_depth {
            if path.len() >= limit {
                return Err(ResolveError::DepthExceeded {
                    url: url.clone(),
                    limit,
                });
            }
        }
        path.push(url.clone());
        Ok(PathEntry { path: &self.path })
    }
}

/// Pops its URL off the in-flight path when the load finishes, on success
/// or error.
struct PathEntry<'p> {
    path: &'p RefCell<Vec<Url>>,
}

impl Drop for PathEntry<'_> {
    fn drop(&mut self) {
        self.path.borrow_mut().pop();
    }
}

/// Load `url` from `cache`, decoding with `decode` and linking with
/// `resolve`, under the default [`LoaderConfig`].
pub fn load<R, T, D, F>(
    cache: &Cache,
    decode: D,
    resolve: F,
    url: impl Into<Url>,
) -> ResolveResult<Remote<T>>
where
    D: FnOnce(&RawValue) -> Result<R, String>,
    F: FnOnce(&Loader<'_>, R) -> ResolveResult<T>,
{
    Loader::new(cache).load(decode, resolve, url)
}

/// Load a value with no nested references from `cache`.
pub fn load_raw<T, D>(cache: &Cache, decode: D, url: impl Into<Url>) -> ResolveResult<Remote<T>>
where
    D: FnOnce(&RawValue) -> Result<T, String>,
{
    Loader::new(cache).load_raw(decode, url)
}

/// Load each of `urls` from `cache` with `load`, preserving order.
pub fn load_list<T, F, I>(cache: &Cache, load: F, urls: I) -> ResolveResult<Vec<Remote<T>>>
where
    F: Fn(&Loader<'_>, &Url) -> ResolveResult<Remote<T>>,
    I: IntoIterator,
    I::Item: Into<Url>,
{
    Loader::new(cache).load_list(load, urls)
}
