//! Typed object graphs over a URL-keyed JSON cache.
//!
//! Values live in a [`Cache`] keyed by [`Url`] and refer to each other by
//! URL. The cache is rebuilt by folding [`Update`] commands; a [`LiveCache`]
//! keeps the current snapshot as updates arrive. Application code then
//! either resolves single [`Reference`]s or loads whole linked values with a
//! [`Loader`].
//!
//! # Example
//!
//! ```
//! use refgraph::{decode_json, load, Cache, Loader, Remote, ResolveResult, Update};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct Writer {
//!     name: String,
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct RawBook {
//!     title: String,
//!     author: String,
//! }
//!
//! struct Book {
//!     title: String,
//!     author: Remote<Writer>,
//! }
//!
//! fn resolve_book(loader: &Loader<'_>, raw: RawBook) -> ResolveResult<Book> {
//!     Ok(Book {
//!         title: raw.title,
//!         author: loader.load_raw(decode_json::<Writer>, &raw.author)?,
//!     })
//! }
//!
//! let cache = Cache::build([
//!     Update::upsert("/b1", json!({"title": "X", "author": "/w1"})),
//!     Update::upsert("/w1", json!({"name": "Ada"})),
//! ]);
//!
//! let book = load(&cache, decode_json::<RawBook>, resolve_book, "/b1").unwrap();
//! assert_eq!(book.url(), "/b1");
//! assert_eq!(book.title, "X");
//! assert_eq!(book.author.name, "Ada");
//! ```

pub use refgraph_cache::{Cache, LiveCache, Update, UpdateRecord};
pub use refgraph_loader::{load, load_list, load_raw, Loader, LoaderConfig, Remote};
pub use refgraph_refs::{create, decode_as_reference, resolve, Reference};
pub use refgraph_types::{
    decode_json, decoder, DecodeFn, RawValue, ResolveError, ResolveResult, Url,
    DEFAULT_DECODE_MESSAGE,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use tokio::sync::mpsc;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Writer {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct RawBook {
        title: String,
        author: Reference<Writer>,
    }

    #[derive(Debug, PartialEq, Serialize)]
    struct Book {
        title: String,
        author: Remote<Writer>,
    }

    fn resolve_book(loader: &Loader<'_>, raw: RawBook) -> ResolveResult<Book> {
        Ok(Book {
            title: raw.title,
            author: loader.resolve(&raw.author)?,
        })
    }

    fn load_book(loader: &Loader<'_>, url: &Url) -> ResolveResult<Remote<Book>> {
        loader.load(decode_json::<RawBook>, resolve_book, url)
    }

    fn feed(records: serde_json::Value) -> Vec<Update> {
        let records: Vec<Option<UpdateRecord>> = serde_json::from_value(records).unwrap();
        records.into_iter().map(Update::from).collect()
    }

    #[test]
    fn leaf_value_is_tagged_with_its_url() {
        let cache = Cache::build(feed(json!([{"url": "/w1", "value": {"name": "Ada"}}])));
        let writer = load_raw(&cache, decode_json::<Writer>, "/w1").unwrap();
        assert_eq!(
            serde_json::to_value(&writer).unwrap(),
            json!({"name": "Ada", "url": "/w1"})
        );
    }

    #[test]
    fn missing_url_is_not_found() {
        let err = load_raw(&Cache::new(), decode_json::<Writer>, "/missing").unwrap_err();
        assert_eq!(err, ResolveError::not_found("/missing"));
    }

    #[test]
    fn book_links_its_author() {
        let cache = Cache::build(feed(json!([
            {"url": "/b1", "value": {"title": "X", "author": "/w1"}},
            {"url": "/w1", "value": {"name": "Ada"}},
        ])));
        let book = load(&cache, decode_json::<RawBook>, resolve_book, "/b1").unwrap();
        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({"title": "X", "author": {"name": "Ada", "url": "/w1"}, "url": "/b1"})
        );
    }

    #[test]
    fn missing_author_fails_the_book() {
        let cache = Cache::build(feed(json!([
            {"url": "/b1", "value": {"title": "X", "author": "/missing"}},
        ])));
        let err = load(&cache, decode_json::<RawBook>, resolve_book, "/b1").unwrap_err();
        assert_eq!(err, ResolveError::not_found("/missing"));
    }

    #[test]
    fn one_missing_book_fails_the_list() {
        let cache = Cache::build(feed(json!([
            {"url": "/b1", "value": {"title": "X", "author": "/w1"}},
            {"url": "/w1", "value": {"name": "Ada"}},
        ])));
        let err = load_list(&cache, load_book, ["/b1", "/b2"]).unwrap_err();
        assert_eq!(err, ResolveError::not_found("/b2"));
    }

    #[test]
    fn reload_after_feed_delivers_missing_value() {
        let live = LiveCache::new();
        live.apply_all(feed(json!([
            {"url": "/b1", "value": {"title": "X", "author": "/w1"}},
            null,
        ])));

        let first = live.snapshot();
        assert!(load(&first, decode_json::<RawBook>, resolve_book, "/b1")
            .unwrap_err()
            .is_not_found());

        live.apply(Update::upsert("/w1", json!({"name": "Ada"})));
        let book = load(&live.snapshot(), decode_json::<RawBook>, resolve_book, "/b1").unwrap();
        assert_eq!(book.author.name, "Ada");

        // The earlier snapshot still lacks the author.
        assert!(!first.contains("/w1"));
    }

    #[tokio::test]
    async fn feed_channel_populates_live_cache() {
        let live = LiveCache::new();
        let (tx, rx) = mpsc::channel(4);

        for update in feed(json!([
            {"url": "/w1", "value": {"name": "Ada"}},
            {"url": "/w2", "value": {"name": "Grace"}},
            {"url": "/w2"},
        ])) {
            tx.send(update).await.unwrap();
        }
        drop(tx);

        let snapshot = live.run(rx).await;
        let loader = Loader::new(&snapshot);
        let writers = loader
            .load_list(|l, url| l.load_raw(decode_json::<Writer>, url), ["/w1"])
            .unwrap();
        assert_eq!(writers[0].name, "Ada");
        assert!(loader.load_raw(decode_json::<Writer>, "/w2").is_err());
    }
}
