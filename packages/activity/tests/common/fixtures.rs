//! Event builders for the standard test world: network "polkadot", post 10
//! authored by user 5, actor user 1.

use activity_core::domains::activity::ActivityEvent;

pub const NETWORK: &str = "polkadot";
pub const POST_ID: i64 = 10;
pub const POST_AUTHOR: i64 = 5;
pub const POST_TYPE: &str = "discussion";
pub const ACTOR: i64 = 1;

pub fn post_created(content: &str) -> ActivityEvent {
    ActivityEvent::PostCreated {
        network: NETWORK.to_string(),
        by: POST_AUTHOR,
        post_id: POST_ID,
        post_author_id: POST_AUTHOR,
        post_type: POST_TYPE.to_string(),
        content: content.to_string(),
    }
}

pub fn post_edited(content: &str) -> ActivityEvent {
    ActivityEvent::PostEdited {
        network: NETWORK.to_string(),
        by: POST_AUTHOR,
        post_id: POST_ID,
        post_author_id: POST_AUTHOR,
        post_type: POST_TYPE.to_string(),
        content: content.to_string(),
    }
}

pub fn comment_created(comment_id: &str, content: &str) -> ActivityEvent {
    ActivityEvent::CommentCreated {
        network: NETWORK.to_string(),
        by: ACTOR,
        post_id: POST_ID,
        post_author_id: POST_AUTHOR,
        post_type: POST_TYPE.to_string(),
        comment_id: comment_id.into(),
        comment_author_id: ACTOR,
        content: content.to_string(),
    }
}

pub fn comment_edited(comment_id: &str, content: &str) -> ActivityEvent {
    ActivityEvent::CommentEdited {
        network: NETWORK.to_string(),
        by: ACTOR,
        post_id: POST_ID,
        post_author_id: POST_AUTHOR,
        post_type: POST_TYPE.to_string(),
        comment_id: comment_id.into(),
        comment_author_id: ACTOR,
        content: content.to_string(),
    }
}

pub fn comment_deleted(comment_id: &str) -> ActivityEvent {
    ActivityEvent::CommentDeleted {
        network: NETWORK.to_string(),
        by: ACTOR,
        comment_id: comment_id.into(),
    }
}

pub fn reply_created(comment_id: &str, reply_id: &str, content: &str) -> ActivityEvent {
    ActivityEvent::ReplyCreated {
        network: NETWORK.to_string(),
        by: ACTOR,
        post_id: POST_ID,
        post_author_id: POST_AUTHOR,
        post_type: POST_TYPE.to_string(),
        comment_id: comment_id.into(),
        comment_author_id: ACTOR,
        reply_id: reply_id.into(),
        reply_author_id: ACTOR,
        content: content.to_string(),
    }
}

pub fn reply_deleted(reply_id: &str) -> ActivityEvent {
    ActivityEvent::ReplyDeleted {
        network: NETWORK.to_string(),
        by: ACTOR,
        reply_id: reply_id.into(),
    }
}

/// Reaction by `ACTOR` targeting a comment.
pub fn reaction_on_comment(reaction_id: &str, comment_id: &str) -> ActivityEvent {
    ActivityEvent::ReactionCreated {
        network: NETWORK.to_string(),
        by: ACTOR,
        reaction_id: reaction_id.into(),
        reaction_author_id: ACTOR,
        post_id: Some(POST_ID),
        post_author_id: Some(POST_AUTHOR),
        post_type: Some(POST_TYPE.to_string()),
        comment_id: Some(comment_id.into()),
        comment_author_id: Some(ACTOR),
        reply_id: None,
        reply_author_id: None,
    }
}

/// Reaction by `ACTOR` targeting a reply.
pub fn reaction_on_reply(reaction_id: &str, comment_id: &str, reply_id: &str) -> ActivityEvent {
    ActivityEvent::ReactionCreated {
        network: NETWORK.to_string(),
        by: ACTOR,
        reaction_id: reaction_id.into(),
        reaction_author_id: ACTOR,
        post_id: Some(POST_ID),
        post_author_id: Some(POST_AUTHOR),
        post_type: Some(POST_TYPE.to_string()),
        comment_id: Some(comment_id.into()),
        comment_author_id: Some(ACTOR),
        reply_id: Some(reply_id.into()),
        reply_author_id: Some(ACTOR),
    }
}

/// Reaction by `ACTOR` targeting the post itself.
pub fn reaction_on_post(reaction_id: &str) -> ActivityEvent {
    ActivityEvent::ReactionCreated {
        network: NETWORK.to_string(),
        by: ACTOR,
        reaction_id: reaction_id.into(),
        reaction_author_id: ACTOR,
        post_id: Some(POST_ID),
        post_author_id: Some(POST_AUTHOR),
        post_type: Some(POST_TYPE.to_string()),
        comment_id: None,
        comment_author_id: None,
        reply_id: None,
        reply_author_id: None,
    }
}

pub fn reaction_deleted(reaction_id: &str) -> ActivityEvent {
    ActivityEvent::ReactionDeleted {
        network: NETWORK.to_string(),
        by: ACTOR,
        reaction_id: reaction_id.into(),
    }
}
