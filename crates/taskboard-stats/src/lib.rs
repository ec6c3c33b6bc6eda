//! # taskboard-stats
//!
//! Derived views over the user and task collections. This crate is the single
//! place where users and tasks are joined; presentation code only reads its
//! results.
//!
//! Every function is pure. Assignee references that name no user simply
//! match nothing.

#![deny(unsafe_code)]

pub mod completion;
pub mod distribution;
pub mod leaderboard;

pub use completion::{UserProgress, completed_count_for, user_progress};
pub use distribution::{StatusShare, TaskDistribution, task_distribution};
pub use leaderboard::{
    LeaderboardEntry, NextTarget, build_leaderboard, has_activity, next_target_for, rank_of,
    top_performer,
};
