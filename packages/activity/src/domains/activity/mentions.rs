//! Mention extraction.
//!
//! Content arrives either as raw markdown (`[@bob](../user/bob)` style
//! tokens) or as rendered HTML where the mention sits inside an `href`
//! attribute. A single pattern cannot bound both: the markdown form ends at
//! the first non-word character, the attribute form ends at the closing
//! quote. We pick the pattern by sniffing for an HTML paragraph marker.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::common::UserId;
use crate::kernel::ActivityDeps;

/// Occurrence cap checked before any regex scan. Content shipping more
/// `user/` tokens than this is not a good-faith mention list.
const MENTION_OCCURRENCE_LIMIT: usize = 1000;

lazy_static! {
    // Markdown-safe: mention token is a bare username slug.
    static ref MARKDOWN_MENTION_REGEX: Regex = Regex::new(r"user/([\w-]+)").unwrap();

    // HTML-safe: mention sits in an href value, username runs until the
    // closing quote or a path separator.
    static ref HTML_MENTION_REGEX: Regex = Regex::new(r#"user/([^"/]+)"#).unwrap();
}

/// Extract and resolve every `user/<name>` reference in `content`.
///
/// Duplicates are preserved; usernames missing from the directory are
/// dropped silently. Directory read failures propagate.
pub async fn extract_mentioned_users(
    deps: &ActivityDeps,
    content: &str,
) -> Result<Vec<UserId>> {
    let occurrences = content.matches("user/").count();
    if occurrences > MENTION_OCCURRENCE_LIMIT {
        warn!(occurrences, "mention scan aborted, occurrence cap exceeded");
        return Ok(Vec::new());
    }

    let pattern: &Regex = if content.contains("<p") {
        &HTML_MENTION_REGEX
    } else {
        &MARKDOWN_MENTION_REGEX
    };

    let usernames: Vec<&str> = pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if usernames.is_empty() {
        return Ok(Vec::new());
    }

    let directory = deps.directory.username_map().await?;

    Ok(usernames
        .into_iter()
        .filter_map(|name| directory.get(name).copied())
        .collect())
}
