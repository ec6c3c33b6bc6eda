//! Register, assign, complete, rank: the full board flow over one store.

#![allow(unused_results)]

use taskboard_core::{Role, TaskStatus};
use taskboard_stats::{
    build_leaderboard, completed_count_for, next_target_for, rank_of, task_distribution,
    top_performer, user_progress,
};
use taskboard_store::BoardStore;
use taskboard_tasks::{AssignParams, TaskDirectory};
use taskboard_users::{PasswordHasher, Session, UserDirectory};

fn assign(tasks: &TaskDirectory<'_>, title: &str, to: &str) -> taskboard_core::Task {
    tasks
        .assign(&AssignParams {
            title: title.to_string(),
            assigned_to: to.to_string(),
            ..AssignParams::default()
        })
        .unwrap()
}

#[test]
fn alice_completes_her_report_and_leads() {
    let store = BoardStore::in_memory();
    let users = UserDirectory::with_hasher(&store, PasswordHasher::new(1_000));
    let tasks = TaskDirectory::new(&store);

    users.register("admin@x.com", "admin123", Role::Admin).unwrap();
    users.register("alice@x.com", "pw123456", Role::User).unwrap();

    let session = Session::new(&users);
    session.login("admin@x.com", "admin123", Role::Admin).unwrap();
    session.require_role(Role::Admin).unwrap();
    let report = assign(&tasks, "Write report", "alice@x.com");

    let mine = tasks.list_for_assignee("ALICE@X.COM").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Write report");
    assert_eq!(mine[0].status, TaskStatus::Pending);

    session.login("alice@x.com", "pw123456", Role::User).unwrap();
    let me = session.require_role(Role::User).unwrap();
    tasks
        .set_status(report.id, TaskStatus::Completed, me.email.as_str())
        .unwrap();

    let board = build_leaderboard(&store.users().unwrap(), &store.tasks().unwrap());
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].user.email.as_str(), "alice@x.com");
    assert_eq!(board[0].completed_count, 1);
    assert_eq!(board[0].rank, 1);
    assert_eq!(top_performer(&board).unwrap().rank, 1);
}

#[test]
fn second_place_sees_the_gap() {
    let store = BoardStore::in_memory();
    let users = UserDirectory::with_hasher(&store, PasswordHasher::new(1_000));
    let tasks = TaskDirectory::new(&store);
    users.register("alice@x.com", "pw123456", Role::User).unwrap();
    users.register("bob@x.com", "pw123456", Role::User).unwrap();

    for title in ["one", "two", "three"] {
        let task = assign(&tasks, title, "alice@x.com");
        tasks
            .set_status(task.id, TaskStatus::Completed, "alice@x.com")
            .unwrap();
    }
    let bobs = assign(&tasks, "four", "bob@x.com");
    tasks
        .set_status(bobs.id, TaskStatus::Completed, "bob@x.com")
        .unwrap();
    assign(&tasks, "five", "bob@x.com");

    let all = store.tasks().unwrap();
    let board = build_leaderboard(&store.users().unwrap(), &all);
    let bob_rank = rank_of("bob@x.com", &board).unwrap();
    assert_eq!(bob_rank, 2);
    let target = next_target_for(bob_rank, &board).unwrap();
    assert_eq!(target.user.user.email.as_str(), "alice@x.com");
    assert_eq!(target.gap, 2);

    let progress = user_progress("bob@x.com", &all);
    assert_eq!((progress.assigned, progress.completed), (2, 1));
    assert!((progress.percent - 50.0).abs() < 1e-9);

    let dist = task_distribution(&all);
    assert_eq!(dist.total, 5);
    assert_eq!(dist.get(TaskStatus::Completed).count, 4);
    assert_eq!(dist.get(TaskStatus::Pending).count, 1);
}

#[test]
fn removed_user_drops_off_the_board() {
    let store = BoardStore::in_memory();
    let users = UserDirectory::with_hasher(&store, PasswordHasher::new(1_000));
    let tasks = TaskDirectory::new(&store);
    users.register("alice@x.com", "pw123456", Role::User).unwrap();
    users.register("bob@x.com", "pw123456", Role::User).unwrap();
    assign(&tasks, "orphan", "bob@x.com");

    assert!(users.remove("bob@x.com").unwrap());

    let all = store.tasks().unwrap();
    assert_eq!(all.len(), 1);
    let board = build_leaderboard(&store.users().unwrap(), &all);
    assert_eq!(board.len(), 1);
    assert_eq!(rank_of("bob@x.com", &board), None);
}

#[test]
fn task_assigned_as_completed_counts_immediately() {
    let store = BoardStore::in_memory();
    let users = UserDirectory::with_hasher(&store, PasswordHasher::new(1_000));
    let tasks = TaskDirectory::new(&store);
    users.register("alice@x.com", "pw123456", Role::User).unwrap();

    tasks
        .assign(&AssignParams {
            title: "Backfilled report".to_string(),
            assigned_to: "alice@x.com".to_string(),
            status: Some(TaskStatus::Completed),
            ..AssignParams::default()
        })
        .unwrap();

    let all = store.tasks().unwrap();
    assert_eq!(completed_count_for("ALICE@x.com", &all), 1);
    let board = build_leaderboard(&store.users().unwrap(), &all);
    assert_eq!(board[0].completed_count, 1);
    assert_eq!(top_performer(&board).unwrap().user.email.as_str(), "alice@x.com");
}
