//! Activity writers.
//!
//! One operation per mutation shape. Every operation follows the same
//! pattern: resolve mentions, build zero to two record payloads, commit them
//! in one atomic batch. Commit failures are logged and swallowed here - the
//! ledger is decoration on top of an already-committed primary write, and a
//! lost batch must never surface as an error to the platform. Read failures
//! (directory, existing-record queries) propagate to the caller.

use anyhow::Result;
use serde_json::to_value;
use tracing::{debug, error, warn};

use crate::common::UserId;
use crate::kernel::{eq, ActivityDeps, Document, Filter, WriteBatch};

use super::mentions::extract_mentioned_users;
use super::models::{
    fields, reaction_record_key, soft_delete_patch, ActivityRecord, ActivityType, CommentRef,
    PostRef, ReactionRef, ReactionScope, ReplyRef, USER_ACTIVITY_COLLECTION,
    REACTION_REPUTATION_DELTA,
};

/// Commit a batch, swallowing failure. Returns whether the batch landed.
pub(crate) async fn commit_or_log(deps: &ActivityDeps, batch: WriteBatch, op: &str) -> bool {
    if batch.is_empty() {
        return true;
    }
    let writes = batch.len();
    match deps.store.commit(batch).await {
        Ok(()) => {
            debug!(op, writes, "activity batch committed");
            true
        }
        Err(err) => {
            error!(op, writes, error = %err, "activity batch commit failed, mutation set discarded");
            false
        }
    }
}

fn mentioned_record(network: &str, by: UserId, mentions: Vec<UserId>) -> ActivityRecord {
    let mut record = ActivityRecord::new(network, by, ActivityType::Mentioned);
    record.mentions = Some(mentions);
    record
}

fn apply_post(record: &mut ActivityRecord, post: &PostRef) {
    record.post_id = Some(post.id);
    record.post_author_id = Some(post.author_id);
    record.post_type = Some(post.post_type.clone());
}

fn apply_comment(record: &mut ActivityRecord, comment: &CommentRef) {
    record.comment_id = Some(comment.id.clone());
    record.comment_author_id = Some(comment.author_id);
}

fn apply_reply(record: &mut ActivityRecord, reply: &ReplyRef) {
    record.reply_id = Some(reply.id.clone());
    record.reply_author_id = Some(reply.author_id);
}

// =============================================================================
// Creation writers
// =============================================================================

/// Record mentions found in a new post. Writes nothing when the content
/// mentions nobody.
pub async fn post_mentions(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    post: &PostRef,
    content: &str,
) -> Result<()> {
    let mentions = extract_mentioned_users(deps, content).await?;
    if mentions.is_empty() {
        return Ok(());
    }

    let mut record = mentioned_record(network, by, mentions);
    apply_post(&mut record, post);

    let mut batch = WriteBatch::new();
    batch.set(USER_ACTIVITY_COLLECTION, None, to_value(&record)?);
    commit_or_log(deps, batch, "post_mentions").await;
    Ok(())
}

/// Record a new comment: one COMMENTED record, plus a MENTIONED record when
/// the content mentions anyone. Both land in the same batch.
pub async fn create_comment_mentions(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    post: &PostRef,
    comment: &CommentRef,
    content: &str,
) -> Result<()> {
    let mentions = extract_mentioned_users(deps, content).await?;

    let mut batch = WriteBatch::new();
    if !mentions.is_empty() {
        let mut record = mentioned_record(network, by, mentions);
        apply_post(&mut record, post);
        apply_comment(&mut record, comment);
        batch.set(USER_ACTIVITY_COLLECTION, None, to_value(&record)?);
    }

    let mut record = ActivityRecord::new(network, by, ActivityType::Commented);
    apply_post(&mut record, post);
    apply_comment(&mut record, comment);
    batch.set(USER_ACTIVITY_COLLECTION, None, to_value(&record)?);

    commit_or_log(deps, batch, "create_comment_mentions").await;
    Ok(())
}

/// Record a new reply: one REPLIED record, plus a MENTIONED record when the
/// content mentions anyone.
pub async fn create_reply_mentions(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    post: &PostRef,
    comment: &CommentRef,
    reply: &ReplyRef,
    content: &str,
) -> Result<()> {
    let mentions = extract_mentioned_users(deps, content).await?;

    let mut batch = WriteBatch::new();
    if !mentions.is_empty() {
        let mut record = mentioned_record(network, by, mentions);
        apply_post(&mut record, post);
        apply_comment(&mut record, comment);
        apply_reply(&mut record, reply);
        batch.set(USER_ACTIVITY_COLLECTION, None, to_value(&record)?);
    }

    let mut record = ActivityRecord::new(network, by, ActivityType::Replied);
    apply_post(&mut record, post);
    apply_comment(&mut record, comment);
    apply_reply(&mut record, reply);
    batch.set(USER_ACTIVITY_COLLECTION, None, to_value(&record)?);

    commit_or_log(deps, batch, "create_reply_mentions").await;
    Ok(())
}

// =============================================================================
// Edit writers (full replace, never a diff)
// =============================================================================

/// Query the existing non-deleted MENTIONED records for one target level.
/// `narrower_absent` drops records that also carry a more specific
/// correlation field - equality-only predicates cannot express "field
/// absent", so the refinement happens here.
async fn existing_mentions(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    target_filter: Filter,
    narrower_absent: &[&str],
) -> Result<Vec<Document>> {
    let docs = deps
        .store
        .get_where(
            USER_ACTIVITY_COLLECTION,
            &[
                eq(fields::NETWORK, network),
                eq(fields::BY, by),
                eq(fields::TYPE, ActivityType::Mentioned.as_str()),
                eq(fields::IS_DELETED, false),
                target_filter,
            ],
            None,
        )
        .await?;

    Ok(docs
        .into_iter()
        .filter(|doc| narrower_absent.iter().all(|f| doc.data.get(f).is_none()))
        .collect())
}

async fn replace_mentions(
    deps: &ActivityDeps,
    existing: Vec<Document>,
    replacement: Option<ActivityRecord>,
    op: &str,
) -> Result<()> {
    let mut batch = WriteBatch::new();
    for doc in existing {
        batch.update(USER_ACTIVITY_COLLECTION, doc.id, soft_delete_patch());
    }
    if let Some(record) = replacement {
        batch.set(USER_ACTIVITY_COLLECTION, None, to_value(&record)?);
    }
    commit_or_log(deps, batch, op).await;
    Ok(())
}

/// Replace the mention set of an edited post.
pub async fn edit_post_mentions(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    post: &PostRef,
    content: &str,
) -> Result<()> {
    let mentions = extract_mentioned_users(deps, content).await?;
    let existing = existing_mentions(
        deps,
        network,
        by,
        eq(fields::POST_ID, post.id),
        &[fields::COMMENT_ID, fields::REPLY_ID],
    )
    .await?;

    let replacement = (!mentions.is_empty()).then(|| {
        let mut record = mentioned_record(network, by, mentions);
        apply_post(&mut record, post);
        record
    });

    replace_mentions(deps, existing, replacement, "edit_post_mentions").await
}

/// Replace the mention set of an edited comment.
pub async fn edit_comment_mentions(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    post: &PostRef,
    comment: &CommentRef,
    content: &str,
) -> Result<()> {
    let mentions = extract_mentioned_users(deps, content).await?;
    let existing = existing_mentions(
        deps,
        network,
        by,
        eq(fields::COMMENT_ID, comment.id.as_str()),
        &[fields::REPLY_ID],
    )
    .await?;

    let replacement = (!mentions.is_empty()).then(|| {
        let mut record = mentioned_record(network, by, mentions);
        apply_post(&mut record, post);
        apply_comment(&mut record, comment);
        record
    });

    replace_mentions(deps, existing, replacement, "edit_comment_mentions").await
}

/// Replace the mention set of an edited reply.
pub async fn edit_reply_mentions(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    post: &PostRef,
    comment: &CommentRef,
    reply: &ReplyRef,
    content: &str,
) -> Result<()> {
    let mentions = extract_mentioned_users(deps, content).await?;
    let existing = existing_mentions(
        deps,
        network,
        by,
        eq(fields::REPLY_ID, reply.id.as_str()),
        &[],
    )
    .await?;

    let replacement = (!mentions.is_empty()).then(|| {
        let mut record = mentioned_record(network, by, mentions);
        apply_post(&mut record, post);
        apply_comment(&mut record, comment);
        apply_reply(&mut record, reply);
        record
    });

    replace_mentions(deps, existing, replacement, "edit_reply_mentions").await
}

// =============================================================================
// Reaction writer
// =============================================================================

/// Record a reaction. The REACTED record lives at a deterministic key per
/// (network, actor, target), so recording is an upsert and at most one
/// active record can exist for the pair. A tombstone occupying the key (the
/// actor reacted, deleted the reaction, reacted again) is moved to a fresh
/// id in the same batch rather than overwritten. The actor's profile score
/// is credited after a successful commit; a failed score change is logged,
/// never propagated.
pub async fn create_reaction(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    reaction: &ReactionRef,
    scope: &ReactionScope,
) -> Result<()> {
    let Some((target_kind, target_id)) = scope.target() else {
        warn!(
            network,
            by,
            reaction_id = %reaction.id,
            "invalid parameters: reaction event carries no target, skipping"
        );
        return Ok(());
    };

    let mut record = ActivityRecord::new(network, by, ActivityType::Reacted);
    record.reaction_id = Some(reaction.id.clone());
    record.reaction_author_id = Some(reaction.author_id);
    record.post_id = scope.post_id;
    record.post_author_id = scope.post_author_id;
    record.post_type = scope.post_type.clone();
    if let Some(comment) = &scope.comment {
        apply_comment(&mut record, comment);
    }
    if let Some(reply) = &scope.reply {
        apply_reply(&mut record, reply);
    }

    let key = reaction_record_key(network, by, target_kind, &target_id);
    let mut batch = WriteBatch::new();
    if let Some(existing) = deps.store.get(USER_ACTIVITY_COLLECTION, &key).await? {
        let deleted = existing
            .data
            .get(fields::IS_DELETED)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if deleted {
            // Displace the tombstone instead of erasing it.
            batch.set(USER_ACTIVITY_COLLECTION, None, existing.data);
        }
    }
    batch.set(USER_ACTIVITY_COLLECTION, Some(key), to_value(&record)?);

    if commit_or_log(deps, batch, "create_reaction").await {
        if let Err(err) = deps
            .reputation
            .change_profile_score(by, REACTION_REPUTATION_DELTA)
            .await
        {
            warn!(by, error = %err, "reputation credit for reaction failed");
        }
    }
    Ok(())
}
