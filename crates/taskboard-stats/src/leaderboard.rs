//! Leaderboard ranking for non-admin users.
//!
//! Rules:
//! - Only users with [`Role::User`] are ranked.
//! - Ordered by completed-task count, highest first.
//! - Ties keep the order users appear in the collection, which is
//!   registration order.
//! - Ranks are 1-based and contiguous: a permutation of `1..=N`.

use taskboard_core::{Role, Task, User};

use crate::completion::completed_count_for;

/// One ranked row.
#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    /// The ranked user.
    pub user: User,
    /// Completed tasks assigned to the user.
    pub completed_count: usize,
    /// 1-based position.
    pub rank: usize,
}

/// The entry directly above a given rank and the gap to close.
#[derive(Clone, Debug, PartialEq)]
pub struct NextTarget<'a> {
    /// Entry ranked one place higher.
    pub user: &'a LeaderboardEntry,
    /// Completed tasks needed to draw level.
    pub gap: usize,
}

/// Rank every [`Role::User`] by completed-task count.
pub fn build_leaderboard(users: &[User], tasks: &[Task]) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<(&User, usize)> = users
        .iter()
        .filter(|u| u.has_role(Role::User))
        .map(|u| (u, completed_count_for(u.email.as_str(), tasks)))
        .collect();
    // sort_by is stable
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    rows.into_iter()
        .enumerate()
        .map(|(i, (user, completed_count))| LeaderboardEntry {
            user: user.clone(),
            completed_count,
            rank: i + 1,
        })
        .collect()
}

/// Rank of `email` on the board, if present.
pub fn rank_of(email: &str, leaderboard: &[LeaderboardEntry]) -> Option<usize> {
    leaderboard
        .iter()
        .find(|e| e.user.email.matches(email))
        .map(|e| e.rank)
}

/// The user to beat for someone at `rank`.
///
/// `None` for the leader and for ranks outside the board.
pub fn next_target_for(rank: usize, leaderboard: &[LeaderboardEntry]) -> Option<NextTarget<'_>> {
    if rank <= 1 || rank > leaderboard.len() {
        return None;
    }
    let above = &leaderboard[rank - 2];
    let current = &leaderboard[rank - 1];
    Some(NextTarget {
        user: above,
        gap: above.completed_count.saturating_sub(current.completed_count),
    })
}

/// The leader, provided they have completed at least one task.
pub fn top_performer(leaderboard: &[LeaderboardEntry]) -> Option<&LeaderboardEntry> {
    leaderboard.first().filter(|e| e.completed_count > 0)
}

/// Whether anyone on the board has completed a task.
pub fn has_activity(leaderboard: &[LeaderboardEntry]) -> bool {
    leaderboard.iter().any(|e| e.completed_count > 0)
}
