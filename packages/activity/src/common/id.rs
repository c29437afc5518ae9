//! Typed wrappers for store-assigned content ids.
//!
//! Comment, reply and reaction ids are opaque strings handed to us by the
//! platform's content store. `ContentId<T>` prevents accidentally passing a
//! `ReplyId` where a `CommentId` was expected while keeping the wire format a
//! plain string.
//!
//! # Example
//!
//! ```rust
//! use activity_core::common::{CommentId, ReplyId};
//!
//! let comment_id = CommentId::from("c-123");
//! let reply_id = ReplyId::from("r-456");
//!
//! // This would be a compile error:
//! // let wrong: CommentId = reply_id;
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker type for comment ids.
pub struct Comment;

/// Marker type for reply ids.
pub struct Reply;

/// Marker type for reaction ids.
pub struct Reaction;

pub type CommentId = ContentId<Comment>;
pub type ReplyId = ContentId<Reply>;
pub type ReactionId = ContentId<Reaction>;

/// A typed wrapper around an opaque string id.
///
/// The type parameter `T` is the entity kind the id belongs to. Ids with
/// different `T` parameters are incompatible at compile time.
#[repr(transparent)]
pub struct ContentId<T>(String, PhantomData<fn() -> T>);

impl<T> ContentId<T> {
    /// Wraps a raw string id from the store.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into(), PhantomData)
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner string.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

// Manual trait impls: derives would put unwanted bounds on `T`.

impl<T> Clone for ContentId<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for ContentId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<T> Display for ContentId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for ContentId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for ContentId<T> {}

impl<T> Hash for ContentId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<String> for ContentId<T> {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl<T> From<&str> for ContentId<T> {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<T> Serialize for ContentId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for ContentId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
