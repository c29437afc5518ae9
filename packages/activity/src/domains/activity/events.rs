//! Activity domain events.
//!
//! Events are immutable facts emitted by the platform's mutation handlers
//! strictly after their primary write succeeded. One event describes one
//! content mutation; the dispatcher routes each variant to exactly one
//! writer or cascade operation.
//!
//! Required correlation is structural: a variant cannot be built without the
//! fields its operation needs, which replaces the field-presence precedence
//! chain the ledger grew out of.

use serde::{Deserialize, Serialize};

use crate::common::{CommentId, PostId, ReactionId, ReplyId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActivityEvent {
    PostCreated {
        network: String,
        by: UserId,
        post_id: PostId,
        post_author_id: UserId,
        post_type: String,
        content: String,
    },
    PostEdited {
        network: String,
        by: UserId,
        post_id: PostId,
        post_author_id: UserId,
        post_type: String,
        content: String,
    },
    CommentCreated {
        network: String,
        by: UserId,
        post_id: PostId,
        post_author_id: UserId,
        post_type: String,
        comment_id: CommentId,
        comment_author_id: UserId,
        content: String,
    },
    CommentEdited {
        network: String,
        by: UserId,
        post_id: PostId,
        post_author_id: UserId,
        post_type: String,
        comment_id: CommentId,
        comment_author_id: UserId,
        content: String,
    },
    CommentDeleted {
        network: String,
        by: UserId,
        comment_id: CommentId,
    },
    ReplyCreated {
        network: String,
        by: UserId,
        post_id: PostId,
        post_author_id: UserId,
        post_type: String,
        comment_id: CommentId,
        comment_author_id: UserId,
        reply_id: ReplyId,
        reply_author_id: UserId,
        content: String,
    },
    ReplyEdited {
        network: String,
        by: UserId,
        post_id: PostId,
        post_author_id: UserId,
        post_type: String,
        comment_id: CommentId,
        comment_author_id: UserId,
        reply_id: ReplyId,
        reply_author_id: UserId,
        content: String,
    },
    ReplyDeleted {
        network: String,
        by: UserId,
        reply_id: ReplyId,
    },
    /// Reaction on a post, comment or reply. Correlation below the reaction
    /// itself is optional; the dispatcher attaches a level only when both its
    /// id and author are present.
    ReactionCreated {
        network: String,
        by: UserId,
        reaction_id: ReactionId,
        reaction_author_id: UserId,
        post_id: Option<PostId>,
        post_author_id: Option<UserId>,
        post_type: Option<String>,
        comment_id: Option<CommentId>,
        comment_author_id: Option<UserId>,
        reply_id: Option<ReplyId>,
        reply_author_id: Option<UserId>,
    },
    ReactionDeleted {
        network: String,
        by: UserId,
        reaction_id: ReactionId,
    },
}

impl ActivityEvent {
    /// Short variant name for logs and the dead-letter record.
    pub fn kind(&self) -> &'static str {
        match self {
            ActivityEvent::PostCreated { .. } => "post_created",
            ActivityEvent::PostEdited { .. } => "post_edited",
            ActivityEvent::CommentCreated { .. } => "comment_created",
            ActivityEvent::CommentEdited { .. } => "comment_edited",
            ActivityEvent::CommentDeleted { .. } => "comment_deleted",
            ActivityEvent::ReplyCreated { .. } => "reply_created",
            ActivityEvent::ReplyEdited { .. } => "reply_edited",
            ActivityEvent::ReplyDeleted { .. } => "reply_deleted",
            ActivityEvent::ReactionCreated { .. } => "reaction_created",
            ActivityEvent::ReactionDeleted { .. } => "reaction_deleted",
        }
    }

    /// The tenant the event belongs to.
    pub fn network(&self) -> &str {
        match self {
            ActivityEvent::PostCreated { network, .. }
            | ActivityEvent::PostEdited { network, .. }
            | ActivityEvent::CommentCreated { network, .. }
            | ActivityEvent::CommentEdited { network, .. }
            | ActivityEvent::CommentDeleted { network, .. }
            | ActivityEvent::ReplyCreated { network, .. }
            | ActivityEvent::ReplyEdited { network, .. }
            | ActivityEvent::ReplyDeleted { network, .. }
            | ActivityEvent::ReactionCreated { network, .. }
            | ActivityEvent::ReactionDeleted { network, .. } => network,
        }
    }
}
