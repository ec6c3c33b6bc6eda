//! Subcommands and their dispatch.
//!
//! Admin-only: `users`, `set-role`, `remove-user`, `assign`, `remove-task`,
//! `stats`. Signed-in: `my-tasks`, `complete`. Everything else is open.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::{Value, json};
use taskboard_core::{Role, TaskId, TaskStatus};
use taskboard_stats::{build_leaderboard, task_distribution, user_progress};
use taskboard_store::BoardStore;
use taskboard_tasks::{AssignParams, TaskDirectory};
use taskboard_users::{PasswordHasher, Session, UserDirectory};

use crate::render;

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// `admin` or `user`.
        #[arg(long, default_value = "user")]
        role: Role,
    },
    /// Sign in.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Role to sign in as.
        #[arg(long, default_value = "user")]
        role: Role,
    },
    /// Sign out.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List accounts with their progress (admin).
    Users {
        /// Only accounts with this role.
        #[arg(long)]
        role: Option<Role>,
    },
    /// Change an account's role (admin).
    SetRole { email: String, role: Role },
    /// Delete an account (admin).
    RemoveUser { email: String },
    /// Assign a new task (admin).
    Assign {
        #[arg(long)]
        title: String,
        /// Assignee email.
        #[arg(long)]
        to: String,
        #[arg(long, default_value = "")]
        description: String,
        /// `pending`, `in-progress` or `completed`.
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// List tasks.
    Tasks {
        /// Only tasks assigned to this email.
        #[arg(long)]
        assignee: Option<String>,
    },
    /// List the signed-in user's tasks.
    MyTasks,
    /// Mark one of your tasks completed.
    Complete { id: TaskId },
    /// Delete a task (admin).
    RemoveTask { id: TaskId },
    /// Show the leaderboard.
    Leaderboard,
    /// Board-wide statistics (admin).
    Stats,
}

/// Command output in both forms; `--json` picks one.
#[derive(Debug)]
pub(crate) struct Rendered {
    pub text: String,
    pub json: Value,
}

impl Rendered {
    fn new(text: impl Into<String>, json: Value) -> Self {
        Self {
            text: text.into(),
            json,
        }
    }
}

/// Run `command` against `store`.
pub(crate) fn execute(
    command: &Command,
    store: &BoardStore,
    hasher: PasswordHasher,
) -> Result<Rendered> {
    let users = UserDirectory::with_hasher(store, hasher);
    let session = Session::new(&users);
    let tasks = TaskDirectory::new(store);

    match command {
        Command::Register {
            email,
            password,
            role,
        } => {
            let user = users
                .register(email, password, *role)
                .context("Registration failed")?;
            Ok(Rendered::new(
                format!("Registered {} as {}", user.email, user.role),
                render::user_json(&user),
            ))
        }

        Command::Login {
            email,
            password,
            role,
        } => {
            let user = session
                .login(email, password, *role)
                .context("Login failed")?;
            Ok(Rendered::new(
                format!("Signed in as {} ({})", user.email, user.role),
                render::user_json(&user),
            ))
        }

        Command::Logout => {
            session.logout()?;
            Ok(Rendered::new("Signed out", json!({ "signedIn": false })))
        }

        Command::Whoami => match session.require_user() {
            Ok(user) => Ok(Rendered::new(
                format!("{} ({})", user.email, user.role),
                render::user_json(&user),
            )),
            Err(taskboard_users::UserError::NotAuthenticated) => {
                Ok(Rendered::new("Not signed in", Value::Null))
            }
            Err(e) => Err(e.into()),
        },

        Command::Users { role } => {
            let _ = session.require_role(Role::Admin)?;
            let all_tasks = tasks.list_all()?;
            let listed = users.list(*role)?;
            let rows: Vec<_> = listed
                .iter()
                .map(|u| (u, user_progress(u.email.as_str(), &all_tasks)))
                .collect();
            Ok(Rendered::new(
                render::users_text(&rows),
                Value::Array(
                    rows.iter()
                        .map(|(u, p)| render::user_progress_json(u, p))
                        .collect(),
                ),
            ))
        }

        Command::SetRole { email, role } => {
            let _ = session.require_role(Role::Admin)?;
            let user = users.update_role(email, *role)?;
            Ok(Rendered::new(
                format!("{} is now {}", user.email, user.role),
                render::user_json(&user),
            ))
        }

        Command::RemoveUser { email } => {
            let _ = session.require_role(Role::Admin)?;
            let removed = users.remove(email)?;
            let text = if removed {
                format!("Removed {email}")
            } else {
                format!("No user {email}")
            };
            Ok(Rendered::new(text, json!({ "removed": removed })))
        }

        Command::Assign {
            title,
            to,
            description,
            status,
        } => {
            let _ = session.require_role(Role::Admin)?;
            if users.find(to)?.is_none() {
                tracing::warn!(assignee = %to, "assigning to an unregistered email");
            }
            let task = tasks.assign(&AssignParams {
                title: title.clone(),
                description: description.clone(),
                assigned_to: to.clone(),
                status: *status,
            })?;
            Ok(Rendered::new(
                format!("Assigned task {} to {}", task.id, task.assigned_to),
                serde_json::to_value(&task)?,
            ))
        }

        Command::Tasks { assignee } => {
            let listed = match assignee {
                Some(email) => tasks.list_for_assignee(email)?,
                None => tasks.list_all()?,
            };
            render::tasks(&listed)
        }

        Command::MyTasks => {
            let me = session.require_user()?;
            render::tasks(&tasks.list_for_assignee(me.email.as_str())?)
        }

        Command::Complete { id } => {
            let me = session.require_user()?;
            let task = tasks.set_status(*id, TaskStatus::Completed, me.email.as_str())?;
            Ok(Rendered::new(
                format!("Completed task {}: {}", task.id, task.title),
                serde_json::to_value(&task)?,
            ))
        }

        Command::RemoveTask { id } => {
            let _ = session.require_role(Role::Admin)?;
            let removed = tasks.remove(*id)?;
            let text = if removed {
                format!("Removed task {id}")
            } else {
                format!("No task {id}")
            };
            Ok(Rendered::new(text, json!({ "removed": removed })))
        }

        Command::Leaderboard => {
            let board = build_leaderboard(&users.list(None)?, &tasks.list_all()?);
            let me = match session.current()? {
                Some(user) => users.find(user.email.as_str())?,
                None => None,
            };
            Ok(render::leaderboard(&board, me.as_ref()))
        }

        Command::Stats => {
            let _ = session.require_role(Role::Admin)?;
            let all_users = users.list(None)?;
            let all_tasks = tasks.list_all()?;
            let board = build_leaderboard(&all_users, &all_tasks);
            let distribution = task_distribution(&all_tasks);
            Ok(render::stats(all_users.len(), &distribution, &board))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_tasks::TaskError;
    use taskboard_users::UserError;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(1_000)
    }

    fn run(store: &BoardStore, command: Command) -> Result<Rendered> {
        execute(&command, store, hasher())
    }

    fn login(store: &BoardStore, email: &str, password: &str, role: Role) {
        let _ = run(
            store,
            Command::Login {
                email: email.into(),
                password: password.into(),
                role,
            },
        )
        .unwrap();
    }

    fn board() -> (tempfile::TempDir, BoardStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BoardStore::open(dir.path());
        let users = UserDirectory::with_hasher(&store, hasher());
        let _ = users.register("admin@x.com", "admin123", Role::Admin).unwrap();
        let _ = users.register("alice@x.com", "pw123456", Role::User).unwrap();
        (dir, store)
    }

    fn assign(store: &BoardStore, title: &str, to: &str) -> TaskId {
        let out = run(
            store,
            Command::Assign {
                title: title.into(),
                to: to.into(),
                description: String::new(),
                status: None,
            },
        )
        .unwrap();
        TaskId::new(out.json["id"].as_i64().unwrap())
    }

    #[test]
    fn whoami_without_session() {
        let (_dir, store) = board();
        let out = run(&store, Command::Whoami).unwrap();
        assert_eq!(out.text, "Not signed in");
        assert!(out.json.is_null());
    }

    #[test]
    fn admin_commands_need_admin() {
        let (_dir, store) = board();
        let err = run(&store, Command::Stats).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UserError>(),
            Some(UserError::NotAuthenticated)
        ));

        login(&store, "alice@x.com", "pw123456", Role::User);
        let err = run(&store, Command::Users { role: None }).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UserError>(),
            Some(UserError::NotAuthorized { required: Role::Admin })
        ));
    }

    #[test]
    fn assign_complete_and_rank() {
        let (_dir, store) = board();
        login(&store, "admin@x.com", "admin123", Role::Admin);
        let id = assign(&store, "Write report", "ALICE@x.com");

        login(&store, "alice@x.com", "pw123456", Role::User);
        let mine = run(&store, Command::MyTasks).unwrap();
        assert_eq!(mine.json.as_array().unwrap().len(), 1);
        assert_eq!(mine.json[0]["status"], "Pending");
        assert_eq!(mine.json[0]["assignedTo"], "alice@x.com");

        let done = run(&store, Command::Complete { id }).unwrap();
        assert_eq!(done.json["status"], "Completed");

        let board = run(&store, Command::Leaderboard).unwrap();
        assert_eq!(board.json["entries"][0]["email"], "alice@x.com");
        assert_eq!(board.json["entries"][0]["completedCount"], 1);
        assert_eq!(board.json["topPerformer"], "alice@x.com");
        assert_eq!(board.json["you"]["rank"], 1);
        assert!(board.text.contains("#1"));
    }

    #[test]
    fn non_assignee_cannot_complete() {
        let (_dir, store) = board();
        login(&store, "admin@x.com", "admin123", Role::Admin);
        let id = assign(&store, "Write report", "alice@x.com");

        let err = run(&store, Command::Complete { id }).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskError>(),
            Some(TaskError::NotAuthorized { .. })
        ));
    }

    #[test]
    fn users_listing_never_shows_passwords() {
        let (_dir, store) = board();
        login(&store, "admin@x.com", "admin123", Role::Admin);
        let out = run(&store, Command::Users { role: None }).unwrap();
        let encoded = out.json.to_string();
        assert!(!encoded.contains("password"));
        assert!(!encoded.contains("pbkdf2"));
        assert_eq!(out.json.as_array().unwrap().len(), 2);

        let only_users = run(
            &store,
            Command::Users {
                role: Some(Role::User),
            },
        )
        .unwrap();
        assert_eq!(only_users.json.as_array().unwrap().len(), 1);
    }

    #[test]
    fn stats_report_distribution() {
        let (_dir, store) = board();
        login(&store, "admin@x.com", "admin123", Role::Admin);
        let _ = assign(&store, "one", "alice@x.com");
        let _ = assign(&store, "two", "alice@x.com");

        let out = run(&store, Command::Stats).unwrap();
        assert_eq!(out.json["users"], 2);
        assert_eq!(out.json["tasks"]["total"], 2);
        assert_eq!(out.json["tasks"]["byStatus"]["Pending"]["count"], 2);
        assert_eq!(out.json["tasks"]["byStatus"]["Completed"]["count"], 0);
    }

    #[test]
    fn removing_missing_records_reports_false() {
        let (_dir, store) = board();
        login(&store, "admin@x.com", "admin123", Role::Admin);
        let out = run(
            &store,
            Command::RemoveUser {
                email: "ghost@x.com".into(),
            },
        )
        .unwrap();
        assert_eq!(out.json["removed"], false);

        let out = run(&store, Command::RemoveTask { id: TaskId::new(7) }).unwrap();
        assert_eq!(out.json["removed"], false);
        assert_eq!(out.text, "No task 7");
    }

    #[test]
    fn logout_clears_session() {
        let (_dir, store) = board();
        login(&store, "alice@x.com", "pw123456", Role::User);
        let _ = run(&store, Command::Logout).unwrap();
        assert!(run(&store, Command::MyTasks).is_err());
    }
}
