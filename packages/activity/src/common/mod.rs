//! Shared types used across the activity domain.

pub mod id;

pub use id::{CommentId, ContentId, ReactionId, ReplyId};

/// Numeric user id assigned by the platform's user directory.
pub type UserId = i64;

/// Numeric post id assigned by the platform's content store.
pub type PostId = i64;
