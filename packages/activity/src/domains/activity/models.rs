//! Persisted shape of the activity ledger.
//!
//! `ActivityRecord` is the only persisted entity. One record describes one
//! actor's action on one target (a comment, a reply, a reaction, or a set of
//! mentions). Records are append-mostly: after creation only `is_deleted` and
//! `updated_at` ever change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::common::{CommentId, PostId, ReactionId, ReplyId, UserId};
use crate::kernel::DocumentId;

/// Collection holding all activity records.
pub const USER_ACTIVITY_COLLECTION: &str = "user_activities";

/// Collection holding events the worker failed to deliver.
pub const DEAD_LETTER_COLLECTION: &str = "activity_dead_letter";

/// Fixed profile-score increment applied to an actor per recorded reaction.
pub const REACTION_REPUTATION_DELTA: i64 = 1;

/// Persisted field names, shared between record serialization and queries.
pub mod fields {
    pub const NETWORK: &str = "network";
    pub const BY: &str = "by";
    pub const TYPE: &str = "type";
    pub const POST_ID: &str = "post_id";
    pub const COMMENT_ID: &str = "comment_id";
    pub const REPLY_ID: &str = "reply_id";
    pub const REACTION_ID: &str = "reaction_id";
    pub const REACTION_AUTHOR_ID: &str = "reaction_author_id";
    pub const IS_DELETED: &str = "is_deleted";
}

/// What a record says the actor did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityType {
    #[serde(rename = "COMMENTED")]
    Commented,
    #[serde(rename = "REPLIED")]
    Replied,
    #[serde(rename = "REACTED")]
    Reacted,
    #[serde(rename = "MENTIONED")]
    Mentioned,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Commented => "COMMENTED",
            ActivityType::Replied => "REPLIED",
            ActivityType::Reacted => "REACTED",
            ActivityType::Mentioned => "MENTIONED",
        }
    }
}

/// One ledger entry. Optional correlation fields are populated per variant
/// and omitted from the stored document when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub network: String,
    pub by: UserId,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_author_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<CommentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_author_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<ReplyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_author_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_id: Option<ReactionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_author_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Vec<UserId>>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// A fresh, non-deleted record with no correlation fields set.
    pub fn new(network: &str, by: UserId, activity_type: ActivityType) -> Self {
        let now = Utc::now();
        Self {
            network: network.to_string(),
            by,
            activity_type,
            post_id: None,
            post_type: None,
            post_author_id: None,
            comment_id: None,
            comment_author_id: None,
            reply_id: None,
            reply_author_id: None,
            reaction_id: None,
            reaction_author_id: None,
            mentions: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The patch flipped onto a record by a cascade soft-delete.
pub fn soft_delete_patch() -> JsonValue {
    json!({
        "is_deleted": true,
        "updated_at": Utc::now(),
    })
}

// =============================================================================
// Correlation references
// =============================================================================

/// The post a mutation happened on.
#[derive(Debug, Clone)]
pub struct PostRef {
    pub id: PostId,
    pub author_id: UserId,
    pub post_type: String,
}

#[derive(Debug, Clone)]
pub struct CommentRef {
    pub id: CommentId,
    pub author_id: UserId,
}

#[derive(Debug, Clone)]
pub struct ReplyRef {
    pub id: ReplyId,
    pub author_id: UserId,
}

#[derive(Debug, Clone)]
pub struct ReactionRef {
    pub id: ReactionId,
    pub author_id: UserId,
}

/// Where a reaction landed. Correlation fields are attached only when the
/// triggering event carried both the id and the author of that level.
#[derive(Debug, Clone, Default)]
pub struct ReactionScope {
    pub post_id: Option<PostId>,
    pub post_author_id: Option<UserId>,
    pub post_type: Option<String>,
    pub comment: Option<CommentRef>,
    pub reply: Option<ReplyRef>,
}

impl ReactionScope {
    /// The most specific target of the reaction: reply, then comment, then
    /// post. `None` means the event carried no usable correlation at all.
    pub fn target(&self) -> Option<(&'static str, String)> {
        if let Some(reply) = &self.reply {
            return Some(("reply", reply.id.as_str().to_string()));
        }
        if let Some(comment) = &self.comment {
            return Some(("comment", comment.id.as_str().to_string()));
        }
        self.post_id.map(|id| ("post", id.to_string()))
    }
}

/// Deterministic document id bounding a (network, actor, target) to a single
/// REACTED record. Creating a reaction upserts at this key, which closes the
/// delete-then-insert race of the naive idempotency guard.
pub fn reaction_record_key(
    network: &str,
    by: UserId,
    target_kind: &str,
    target_id: &str,
) -> DocumentId {
    format!("reacted:{network}:{by}:{target_kind}:{target_id}")
}

/// Which kind of content a cascade delete targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Comment,
    Reply,
}

impl ContentKind {
    /// The record type written at creation time for this content kind.
    pub fn creation_type(&self) -> ActivityType {
        match self {
            ContentKind::Comment => ActivityType::Commented,
            ContentKind::Reply => ActivityType::Replied,
        }
    }

    /// The correlation field that keys records to this content.
    pub fn id_field(&self) -> &'static str {
        match self {
            ContentKind::Comment => fields::COMMENT_ID,
            ContentKind::Reply => fields::REPLY_ID,
        }
    }
}
