//! Activity domain: the user-activity / mention ledger.

pub mod cascade;
pub mod dispatcher;
pub mod events;
pub mod mentions;
pub mod models;
pub mod writer;

pub use dispatcher::create_user_activity;
pub use events::ActivityEvent;
pub use mentions::extract_mentioned_users;
pub use models::{
    ActivityRecord, ActivityType, CommentRef, ContentKind, PostRef, ReactionRef, ReactionScope,
    ReplyRef, DEAD_LETTER_COLLECTION, REACTION_REPUTATION_DELTA, USER_ACTIVITY_COLLECTION,
};
