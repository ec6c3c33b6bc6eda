//! Text and JSON output. Password fields are never rendered.

use std::fmt::Write as _;

use anyhow::Result;
use serde_json::{Value, json};
use taskboard_core::{Task, User};
use taskboard_stats::{
    LeaderboardEntry, TaskDistribution, UserProgress, next_target_for, rank_of, top_performer,
};

use crate::commands::Rendered;

pub(crate) fn user_json(user: &User) -> Value {
    json!({ "email": user.email, "role": user.role })
}

pub(crate) fn user_progress_json(user: &User, progress: &UserProgress) -> Value {
    json!({
        "email": user.email,
        "role": user.role,
        "progress": progress,
    })
}

pub(crate) fn users_text(rows: &[(&User, UserProgress)]) -> String {
    if rows.is_empty() {
        return "No users".to_string();
    }
    let mut out = String::new();
    for (user, p) in rows {
        let _ = writeln!(
            out,
            "{:<32} {:<6} {}/{} completed ({:.0}%)",
            user.email, user.role, p.completed, p.assigned, p.percent
        );
    }
    trim_end(out)
}

pub(crate) fn tasks(tasks: &[Task]) -> Result<Rendered> {
    let text = if tasks.is_empty() {
        "No tasks".to_string()
    } else {
        let mut out = String::new();
        for task in tasks {
            let _ = writeln!(
                out,
                "{}  [{}]  {}  -> {}  ({})",
                task.id, task.status, task.title, task.assigned_to, task.created_at
            );
            if !task.description.is_empty() {
                let _ = writeln!(out, "    {}", task.description);
            }
        }
        trim_end(out)
    };
    Ok(Rendered {
        text,
        json: serde_json::to_value(tasks)?,
    })
}

/// Leaderboard, plus the caller's standing when `me` is on it.
pub(crate) fn leaderboard(board: &[LeaderboardEntry], me: Option<&User>) -> Rendered {
    let mut text = String::new();
    if board.is_empty() {
        text.push_str("No users to rank");
    } else {
        for entry in board {
            let _ = writeln!(
                text,
                "#{:<3} {:<32} {}",
                entry.rank, entry.user.email, entry.completed_count
            );
        }
    }
    match top_performer(board) {
        Some(top) => {
            let _ = write!(
                text,
                "\nTop performer: {} ({} completed)",
                top.user.email, top.completed_count
            );
        }
        None if !board.is_empty() => text.push_str("\nNo completed tasks yet"),
        None => {}
    }

    let you = me.and_then(|user| rank_of(user.email.as_str(), board)).map(|rank| {
        let target = next_target_for(rank, board);
        let _ = write!(text, "\nYou are ranked #{rank}");
        if let Some(t) = &target {
            let _ = write!(text, "; {} is {} ahead", t.user.user.email, t.gap);
        }
        json!({
            "rank": rank,
            "nextTarget": target.map(|t| json!({ "email": t.user.user.email, "gap": t.gap })),
        })
    });

    let entries: Vec<Value> = board
        .iter()
        .map(|e| {
            json!({
                "rank": e.rank,
                "email": e.user.email,
                "completedCount": e.completed_count,
            })
        })
        .collect();
    Rendered {
        text: trim_end(text),
        json: json!({
            "entries": entries,
            "topPerformer": top_performer(board).map(|e| e.user.email.as_str()),
            "you": you,
        }),
    }
}

pub(crate) fn stats(
    user_count: usize,
    distribution: &TaskDistribution,
    board: &[LeaderboardEntry],
) -> Rendered {
    let mut text = format!("Users: {user_count}\nTasks: {}", distribution.total);
    for (status, share) in &distribution.by_status {
        let _ = write!(
            text,
            "\n  {:<12} {:>4} ({:.1}%)",
            status.as_str(),
            share.count,
            share.percent
        );
    }
    if let Some(top) = top_performer(board) {
        let _ = write!(text, "\nTop performer: {}", top.user.email);
    }
    Rendered {
        text,
        json: json!({
            "users": user_count,
            "tasks": distribution,
            "topPerformer": top_performer(board).map(|e| e.user.email.as_str()),
        }),
    }
}

fn trim_end(mut s: String) -> String {
    let len = s.trim_end().len();
    s.truncate(len);
    s
}
