//! Update commands that drive the cache.

use serde::{Deserialize, Serialize};

use refgraph_types::{RawValue, Url};

/// One command of the update feed.
#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    /// Leave the cache unchanged.
    Noop,
    /// Insert or replace the value at `url`.
    Upsert { url: Url, value: RawValue },
    /// Remove the value at `url`, if any.
    Delete { url: Url },
}

impl Update {
    pub fn upsert(url: impl Into<Url>, value: RawValue) -> Self {
        Self::Upsert {
            url: url.into(),
            value,
        }
    }

    pub fn delete(url: impl Into<Url>) -> Self {
        Self::Delete { url: url.into() }
    }

    /// The URL this update touches, or `None` for [`Update::Noop`].
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Noop => None,
            Self::Upsert { url, .. } | Self::Delete { url } => Some(url),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Upsert { .. } => "upsert",
            Self::Delete { .. } => "delete",
        }
    }

    /// The wire form of this update. [`Update::Noop`] has none.
    ///
    /// An upsert of JSON `null` produces a record that reads back as a
    /// delete, since the wire cannot tell the two apart.
    pub fn record(&self) -> Option<UpdateRecord> {
        match self {
            Self::Noop => None,
            Self::Upsert { url, value } => Some(UpdateRecord {
                url: url.clone(),
                value: Some(value.clone()),
            }),
            Self::Delete { url } => Some(UpdateRecord {
                url: url.clone(),
                value: None,
            }),
        }
    }
}

/// Wire shape of one feed element: `{"url": ..., "value": ...}`.
///
/// A missing or `null` value means the entry was removed upstream, so a
/// stored JSON `null` cannot be expressed on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub url: Url,
    #[serde(default)]
    pub value: Option<RawValue>,
}

impl From<UpdateRecord> for Update {
    fn from(record: UpdateRecord) -> Self {
        match record.value {
            Some(value) => Self::Upsert {
                url: record.url,
                value,
            },
            None => Self::Delete { url: record.url },
        }
    }
}

impl From<Option<UpdateRecord>> for Update {
    fn from(record: Option<UpdateRecord>) -> Self {
        record.map_or(Self::Noop, <Self as From<UpdateRecord>>::from)
    }
}
