//! Recursive loading of linked values from a refgraph cache.
//!
//! Stored values point at each other by URL. Loading a value happens in
//! three steps:
//!
//! 1. Look up the URL in the cache snapshot.
//! 2. Decode the raw JSON into a *raw object*: the target shape, with nested
//!    relationships still held as bare URLs.
//! 3. Hand the raw object to a *resolver*, which loads each nested URL
//!    through the same [`Loader`] and assembles the linked value.
//!
//! The result is tagged with its URL as a [`Remote`]. The first error stops
//! the whole load; nothing partially linked is returned and the cache is
//! never written.
//!
//! # Cycles
//!
//! A [`Loader`] tracks the URLs currently being loaded. With the default
//! [`LoaderConfig`], re-entering one of them fails with
//! [`ResolveError::CyclicReference`](refgraph_types::ResolveError::CyclicReference).
//! [`LoaderConfig::unguarded`] turns tracking off; a cyclic graph then
//! recurses until the stack is exhausted, so callers must guarantee their
//! data is acyclic.
//!
//! # Modules
//!
//! - [`config`] — [`LoaderConfig`]
//! - [`remote`] — [`Remote`], a value tagged with its source URL
//! - [`loader`] — [`Loader`] and the [`load`], [`load_raw`], [`load_list`] entry points

pub mod config;
pub mod loader;
pub mod remote;

pub use config::LoaderConfig;
pub use loader::{load, load_list, load_raw, Loader};
pub use remote::Remote;
