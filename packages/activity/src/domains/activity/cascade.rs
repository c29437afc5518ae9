//! Cascade soft-deletes.
//!
//! When content is deleted, every ledger record that depends on it flips to
//! `is_deleted = true`. Records are never physically removed - a deleted
//! reaction leaves a tombstone behind.

use anyhow::Result;
use tracing::warn;

use crate::common::{ReactionId, UserId};
use crate::kernel::{eq, ActivityDeps, Document, WriteBatch};

use super::models::{
    fields, soft_delete_patch, ActivityType, ContentKind, USER_ACTIVITY_COLLECTION,
};

use super::writer::commit_or_log;

/// Soft-delete everything scoped to a deleted comment or reply and the
/// deleting actor: the creation record itself, plus MENTIONED and REACTED
/// records keyed to the content id.
///
/// Invalid parameters (empty network or id, non-positive actor) log and
/// no-op; nothing at this layer ever errors toward the platform for bad
/// correlation data.
pub async fn delete_comment_or_reply(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    kind: ContentKind,
    content_id: &str,
) -> Result<()> {
    if network.is_empty() || content_id.is_empty() || by <= 0 {
        warn!(
            network,
            by,
            content_id,
            ?kind,
            "invalid parameters for content cascade, skipping"
        );
        return Ok(());
    }

    let scoped = |activity_type: ActivityType| {
        let filters = vec![
            eq(fields::NETWORK, network),
            eq(fields::BY, by),
            eq(fields::TYPE, activity_type.as_str()),
            eq(kind.id_field(), content_id),
            eq(fields::IS_DELETED, false),
        ];
        async move {
            deps.store
                .get_where(USER_ACTIVITY_COLLECTION, &filters, None)
                .await
        }
    };

    let creation = scoped(kind.creation_type()).await?;
    let mentioned = scoped(ActivityType::Mentioned).await?;
    // The reaction sweep is driven by its own query result, not the creation
    // record set.
    let reacted = scoped(ActivityType::Reacted).await?;

    let mut batch = WriteBatch::new();
    for doc in creation
        .into_iter()
        .chain(mentioned)
        .chain(reacted)
    {
        batch.update(USER_ACTIVITY_COLLECTION, doc.id, soft_delete_patch());
    }

    commit_or_log(deps, batch, "delete_comment_or_reply").await;
    Ok(())
}

/// Soft-delete the REACTED records for an explicitly removed reaction.
pub async fn delete_reaction(
    deps: &ActivityDeps,
    network: &str,
    by: UserId,
    reaction_id: &ReactionId,
) -> Result<()> {
    if network.is_empty() || reaction_id.as_str().is_empty() || by <= 0 {
        warn!(
            network,
            by,
            reaction_id = %reaction_id,
            "invalid parameters for reaction cascade, skipping"
        );
        return Ok(());
    }

    let matches: Vec<Document> = deps
        .store
        .get_where(
            USER_ACTIVITY_COLLECTION,
            &[
                eq(fields::NETWORK, network),
                eq(fields::BY, by),
                eq(fields::TYPE, ActivityType::Reacted.as_str()),
                eq(fields::REACTION_ID, reaction_id.as_str()),
                eq(fields::REACTION_AUTHOR_ID, by),
                eq(fields::IS_DELETED, false),
            ],
            None,
        )
        .await?;

    let mut batch = WriteBatch::new();
    for doc in matches {
        batch.update(USER_ACTIVITY_COLLECTION, doc.id, soft_delete_patch());
    }

    commit_or_log(deps, batch, "delete_reaction").await;
    Ok(())
}
