//! The sample entity: one row of `sample_table`.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

/// Name of the backing table.
pub const SAMPLE_TABLE: &str = "sample_table";

/// Maximum name length, matching the `VARCHAR(255)` column.
pub const NAME_MAX_CHARS: usize = 255;

/// A persisted sample. Always carries the id assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Sample {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sample that has not been inserted yet (no id).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSample {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewSample {
    /// Both timestamps are stamped with the same instant.
    pub fn new(name: String, now: DateTime<Utc>) -> Self {
        NewSample {
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_persisted(self, id: i64) -> Sample {
        Sample {
            id,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Sample {
    /// Rename and refresh `updated_at`. The new stamp is strictly later than the old one.
    pub fn touch(&mut self, name: String, now: DateTime<Utc>) {
        let floor = self.updated_at + chrono::Duration::microseconds(1);
        self.name = name;
        self.updated_at = now.max(floor);
    }
}

/// Current time at the precision PostgreSQL keeps (microseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sample_stamps_both_timestamps_equally() {
        let at = now();
        let s = NewSample::new("a".into(), at);
        assert_eq!(s.created_at, s.updated_at);
        let p = s.into_persisted(7);
        assert_eq!(p.id, 7);
        assert_eq!(p.created_at, at);
    }

    #[test]
    fn touch_never_moves_updated_at_backwards() {
        let at = now();
        let mut s = NewSample::new("a".into(), at).into_persisted(1);
        s.touch("b".into(), at - chrono::Duration::seconds(5));
        assert_eq!(s.name, "b");
        assert!(s.updated_at > at);
        assert_eq!(s.created_at, at);
    }

    #[test]
    fn now_is_truncated_to_micros() {
        let t = now();
        assert_eq!(t.timestamp_subsec_nanos() % 1_000, 0);
    }
}
