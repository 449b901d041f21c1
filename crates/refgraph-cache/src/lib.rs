//! URL-keyed cache of raw JSON values.
//!
//! The cache is the snapshot every resolution runs against. Its contents are
//! a pure function of the update commands folded into it: consumers never
//! write entries directly.
//!
//! # Modules
//!
//! - [`update`] — The [`Update`] command and its wire shape [`UpdateRecord`]
//! - [`cache`] — The [`Cache`] snapshot and its fold
//! - [`live`] — [`LiveCache`], a continuously updated snapshot fed by a channel
//!
//! # Design Rules
//!
//! 1. Applying an update is total: there are no error conditions.
//! 2. Updates are applied strictly in arrival order.
//! 3. A snapshot handed out is never mutated afterwards; later updates
//!    produce a new snapshot.
//! 4. The cache never interprets the values it stores.

pub mod cache;
pub mod live;
pub mod update;

pub use cache::Cache;
pub use live::LiveCache;
pub use update::{Update, UpdateRecord};
