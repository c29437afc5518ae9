// Agora - Activity Ledger Core
//
// This crate is the user-activity / mention ledger of the Agora discussion
// and governance platform: a derived, append-mostly log of who-did-what-to-
// whom (comments, replies, reactions, @mentions), fed by the platform's
// mutation handlers after their primary writes commit.
//
// Entry points: `domains::activity::create_user_activity` for direct
// dispatch, `kernel::ActivityQueue` for off-path at-least-once processing.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
