//! Event dispatcher.
//!
//! `create_user_activity` is the single entry point of the ledger: it
//! classifies one mutation event and routes it to exactly one writer or
//! cascade operation. The match is exhaustive over the event union, so a new
//! mutation shape cannot be added without deciding its routing here.
//!
//! Read failures propagate out of this function (the queue worker retries
//! them); commit failures were already swallowed by the writers.

use anyhow::Result;

use super::cascade;
use super::events::ActivityEvent;
use super::models::{CommentRef, ContentKind, PostRef, ReactionRef, ReactionScope, ReplyRef};
use super::writer;
use crate::kernel::ActivityDeps;

pub async fn create_user_activity(deps: &ActivityDeps, event: ActivityEvent) -> Result<()> {
    match event {
        ActivityEvent::PostCreated {
            network,
            by,
            post_id,
            post_author_id,
            post_type,
            content,
        } => {
            let post = PostRef {
                id: post_id,
                author_id: post_author_id,
                post_type,
            };
            writer::post_mentions(deps, &network, by, &post, &content).await
        }

        ActivityEvent::PostEdited {
            network,
            by,
            post_id,
            post_author_id,
            post_type,
            content,
        } => {
            let post = PostRef {
                id: post_id,
                author_id: post_author_id,
                post_type,
            };
            writer::edit_post_mentions(deps, &network, by, &post, &content).await
        }

        ActivityEvent::CommentCreated {
            network,
            by,
            post_id,
            post_author_id,
            post_type,
            comment_id,
            comment_author_id,
            content,
        } => {
            let post = PostRef {
                id: post_id,
                author_id: post_author_id,
                post_type,
            };
            let comment = CommentRef {
                id: comment_id,
                author_id: comment_author_id,
            };
            writer::create_comment_mentions(deps, &network, by, &post, &comment, &content).await
        }

        ActivityEvent::CommentEdited {
            network,
            by,
            post_id,
            post_author_id,
            post_type,
            comment_id,
            comment_author_id,
            content,
        } => {
            let post = PostRef {
                id: post_id,
                author_id: post_author_id,
                post_type,
            };
            let comment = CommentRef {
                id: comment_id,
                author_id: comment_author_id,
            };
            writer::edit_comment_mentions(deps, &network, by, &post, &comment, &content).await
        }

        ActivityEvent::CommentDeleted {
            network,
            by,
            comment_id,
        } => {
            cascade::delete_comment_or_reply(
                deps,
                &network,
                by,
                ContentKind::Comment,
                comment_id.as_str(),
            )
            .await
        }

        ActivityEvent::ReplyCreated {
            network,
            by,
            post_id,
            post_author_id,
            post_type,
            comment_id,
            comment_author_id,
            reply_id,
            reply_author_id,
            content,
        } => {
            let post = PostRef {
                id: post_id,
                author_id: post_author_id,
                post_type,
            };
            let comment = CommentRef {
                id: comment_id,
                author_id: comment_author_id,
            };
            let reply = ReplyRef {
                id: reply_id,
                author_id: reply_author_id,
            };
            writer::create_reply_mentions(deps, &network, by, &post, &comment, &reply, &content)
                .await
        }

        ActivityEvent::ReplyEdited {
            network,
            by,
            post_id,
            post_author_id,
            post_type,
            comment_id,
            comment_author_id,
            reply_id,
            reply_author_id,
            content,
        } => {
            let post = PostRef {
                id: post_id,
                author_id: post_author_id,
                post_type,
            };
            let comment = CommentRef {
                id: comment_id,
                author_id: comment_author_id,
            };
            let reply = ReplyRef {
                id: reply_id,
                author_id: reply_author_id,
            };
            writer::edit_reply_mentions(deps, &network, by, &post, &comment, &reply, &content)
                .await
        }

        ActivityEvent::ReplyDeleted {
            network,
            by,
            reply_id,
        } => {
            cascade::delete_comment_or_reply(
                deps,
                &network,
                by,
                ContentKind::Reply,
                reply_id.as_str(),
            )
            .await
        }

        ActivityEvent::ReactionCreated {
            network,
            by,
            reaction_id,
            reaction_author_id,
            post_id,
            post_author_id,
            post_type,
            comment_id,
            comment_author_id,
            reply_id,
            reply_author_id,
        } => {
            let reaction = ReactionRef {
                id: reaction_id,
                author_id: reaction_author_id,
            };
            // A correlation level is attached only when both its id and its
            // author arrived on the event.
            let scope = ReactionScope {
                post_id,
                post_author_id,
                post_type,
                comment: match (comment_id, comment_author_id) {
                    (Some(id), Some(author_id)) => Some(CommentRef { id, author_id }),
                    _ => None,
                },
                reply: match (reply_id, reply_author_id) {
                    (Some(id), Some(author_id)) => Some(ReplyRef { id, author_id }),
                    _ => None,
                },
            };
            writer::create_reaction(deps, &network, by, &reaction, &scope).await
        }

        ActivityEvent::ReactionDeleted {
            network,
            by,
            reaction_id,
        } => cascade::delete_reaction(deps, &network, by, &reaction_id).await,
    }
}
