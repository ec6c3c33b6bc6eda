//! Task identifiers.
//!
//! Task IDs are integers derived from the millisecond clock, which keeps them
//! roughly creation-ordered and compatible with records written by earlier
//! clients. The clock alone collides when two tasks are created in the same
//! millisecond, so every ID goes through [`TaskIdGenerator`], which never
//! issues a value at or below the last one it issued or the highest one
//! already stored.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique identifier for a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wrap a raw integer.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw integer.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TaskId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Issues strictly increasing [`TaskId`]s.
#[derive(Debug, Default)]
pub struct TaskIdGenerator {
    last: AtomicI64,
}

impl TaskIdGenerator {
    /// Create a generator that has not issued anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ID using the current UTC clock.
    ///
    /// `floor` is the highest ID already persisted; the result is always
    /// greater than it.
    pub fn next_id(&self, floor: Option<TaskId>) -> TaskId {
        self.next_at(chrono::Utc::now().timestamp_millis(), floor)
    }

    /// Issue the next ID as if the clock read `now_ms`.
    pub fn next_at(&self, now_ms: i64, floor: Option<TaskId>) -> TaskId {
        let floor = floor.map_or(0, TaskId::get);
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let candidate = now_ms
                .max(last.saturating_add(1))
                .max(floor.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return TaskId(candidate),
                Err(actual) => last = actual,
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_the_clock_when_it_moves_forward() {
        let ids = TaskIdGenerator::new();
        assert_eq!(ids.next_at(1_000, None), TaskId::new(1_000));
        assert_eq!(ids.next_at(2_000, None), TaskId::new(2_000));
    }

    #[test]
    fn same_millisecond_yields_distinct_ids() {
        let ids = TaskIdGenerator::new();
        let a = ids.next_at(5_000, None);
        let b = ids.next_at(5_000, None);
        let c = ids.next_at(5_000, None);
        assert!(a < b && b < c);
    }

    #[test]
    fn clock_going_backwards_still_increases() {
        let ids = TaskIdGenerator::new();
        let a = ids.next_at(9_000, None);
        let b = ids.next_at(3_000, None);
        assert!(b > a);
    }

    #[test]
    fn stays_above_persisted_floor() {
        let ids = TaskIdGenerator::new();
        let id = ids.next_at(100, Some(TaskId::new(7_777)));
        assert_eq!(id, TaskId::new(7_778));
    }

    #[test]
    fn next_id_uses_wall_clock() {
        let ids = TaskIdGenerator::new();
        let before = chrono::Utc::now().timestamp_millis();
        let id = ids.next_id(None);
        assert!(id.get() >= before);
    }

    #[test]
    fn parses_and_displays() {
        let id: TaskId = " 42 ".parse().unwrap();
        assert_eq!(id, TaskId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<TaskId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&TaskId::new(1_718_000_000_000)).unwrap();
        assert_eq!(json, "1718000000000");
    }
}
