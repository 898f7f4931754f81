// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process location store with the semantics of the deployed
//! key-value layout:
//!
//! - one record per user holding the current fix, expiring after the
//!   active TTL (120 s in production);
//! - one timestamp-ordered timeline per user, capped at a maximum entry
//!   count and expiring after the history TTL (24 h in production).
//!
//! Expiry is lazy: expired entries are dropped on read, the way a TTL'd
//! key simply stops existing. Every operation is a single round trip and
//! the interface stays fallible so a networked backend can replace this
//! one without touching callers.

use crate::error::AppError;
use crate::models::UserLocationRecord;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// A value with its expiry deadline.
#[derive(Debug, Clone)]
struct Expiring<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

impl<T> Expiring<T> {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Per-user timeline, newest at the back.
type Timeline = Expiring<VecDeque<UserLocationRecord>>;

struct Inner {
    current: DashMap<String, Expiring<UserLocationRecord>>,
    history: DashMap<String, Timeline>,
}

/// Location store handle. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct LocationDb {
    inner: Arc<Inner>,
    active_ttl: Duration,
    history_ttl: Duration,
    history_cap: usize,
}

impl LocationDb {
    pub fn new(active_ttl: Duration, history_ttl: Duration, history_cap: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                current: DashMap::new(),
                history: DashMap::new(),
            }),
            active_ttl,
            history_ttl,
            history_cap,
        }
    }

    /// Store a user's current fix, refreshing its TTL.
    pub fn set_current(&self, record: &UserLocationRecord) -> Result<(), AppError> {
        self.inner.current.insert(
            record.username.clone(),
            Expiring {
                value: record.clone(),
                expires_at: Utc::now() + self.active_ttl,
            },
        );
        Ok(())
    }

    /// The user's current fix, absent once the active TTL has elapsed.
    pub fn get_current(&self, username: &str) -> Result<Option<UserLocationRecord>, AppError> {
        let now = Utc::now();
        // Read first and drop the shard guard before removing; removing
        // under the guard would deadlock.
        let mut expired = false;
        let result = match self.inner.current.get(username) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(_) => {
                expired = true;
                None
            }
            None => None,
        };
        if expired {
            self.inner.current.remove(username);
        }
        Ok(result)
    }

    /// Scan all non-expired current fixes.
    pub fn scan_active(&self) -> Result<HashMap<String, UserLocationRecord>, AppError> {
        let now = Utc::now();
        self.inner.current.retain(|_, entry| !entry.is_expired(now));
        Ok(self
            .inner
            .current
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().value.clone()))
            .collect())
    }

    /// Insert a fix into the user's timeline in timestamp order, trimming
    /// the oldest entries past the cap and refreshing the timeline's TTL.
    pub fn append_history(&self, record: &UserLocationRecord) -> Result<(), AppError> {
        let now = Utc::now();
        let mut entry = self
            .inner
            .history
            .entry(record.username.clone())
            .or_insert_with(|| Expiring {
                value: VecDeque::new(),
                expires_at: now + self.history_ttl,
            });

        if entry.is_expired(now) {
            entry.value.clear();
        }
        entry.expires_at = now + self.history_ttl;

        // Fixes normally arrive in order; walk back only as far as needed
        // to keep the timeline sorted by timestamp.
        let timeline = &mut entry.value;
        let mut idx = timeline.len();
        while idx > 0 && timeline[idx - 1].timestamp > record.timestamp {
            idx -= 1;
        }
        timeline.insert(idx, record.clone());

        while timeline.len() > self.history_cap {
            timeline.pop_front();
        }
        Ok(())
    }

    /// The user's timeline, most recent first. Empty for unknown or
    /// expired users.
    pub fn get_history(
        &self,
        username: &str,
        limit: Option<usize>,
    ) -> Result<Vec<UserLocationRecord>, AppError> {
        let now = Utc::now();
        let mut expired = false;
        let records = match self.inner.history.get(username) {
            Some(entry) if !entry.is_expired(now) => {
                entry.value.iter().rev().cloned().collect::<Vec<_>>()
            }
            Some(_) => {
                expired = true;
                Vec::new()
            }
            None => Vec::new(),
        };
        if expired {
            self.inner.history.remove(username);
        }

        Ok(match limit {
            Some(n) => records.into_iter().take(n).collect(),
            None => records,
        })
    }

    /// Usernames with a live timeline (the leaderboard's population).
    pub fn history_usernames(&self) -> Result<Vec<String>, AppError> {
        let now = Utc::now();
        self.inner.history.retain(|_, entry| !entry.is_expired(now));
        Ok(self
            .inner
            .history
            .iter()
            .map(|entry| entry.key().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GpsCoords;

    fn record(username: &str, timestamp: i64) -> UserLocationRecord {
        UserLocationRecord {
            username: username.to_string(),
            timestamp,
            coords: GpsCoords::new(37.77, -122.41),
        }
    }

    fn db() -> LocationDb {
        LocationDb::new(Duration::seconds(120), Duration::hours(24), 5)
    }

    #[test]
    fn test_current_round_trip() {
        let db = db();
        db.set_current(&record("alice", 1000)).unwrap();
        let got = db.get_current("alice").unwrap().unwrap();
        assert_eq!(got.timestamp, 1000);
        assert!(db.get_current("bob").unwrap().is_none());
    }

    #[test]
    fn test_current_expires() {
        let db = LocationDb::new(Duration::milliseconds(30), Duration::hours(24), 5);
        db.set_current(&record("alice", 1000)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(60));
        assert!(db.get_current("alice").unwrap().is_none());
        assert!(db.scan_active().unwrap().is_empty());
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let db = db();
        for ts in [1000, 2000, 3000] {
            db.append_history(&record("alice", ts)).unwrap();
        }
        let history = db.get_history("alice", None).unwrap();
        let stamps: Vec<i64> = history.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![3000, 2000, 1000]);

        let limited = db.get_history("alice", Some(2)).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].timestamp, 3000);
    }

    #[test]
    fn test_history_orders_late_arrivals_by_timestamp() {
        let db = db();
        for ts in [1000, 3000, 2000] {
            db.append_history(&record("alice", ts)).unwrap();
        }
        let stamps: Vec<i64> = db
            .get_history("alice", None)
            .unwrap()
            .iter()
            .map(|r| r.timestamp)
            .collect();
        assert_eq!(stamps, vec![3000, 2000, 1000]);
    }

    #[test]
    fn test_history_cap_evicts_oldest() {
        let db = db(); // cap = 5
        for ts in 1..=8 {
            db.append_history(&record("alice", ts * 1000)).unwrap();
        }
        let stamps: Vec<i64> = db
            .get_history("alice", None)
            .unwrap()
            .iter()
            .map(|r| r.timestamp)
            .collect();
        assert_eq!(stamps, vec![8000, 7000, 6000, 5000, 4000]);
    }

    #[test]
    fn test_history_expires_as_a_unit() {
        let db = LocationDb::new(Duration::seconds(120), Duration::milliseconds(30), 5);
        db.append_history(&record("alice", 1000)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(60));
        assert!(db.get_history("alice", None).unwrap().is_empty());
        assert!(db.history_usernames().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_user_is_empty_not_error() {
        let db = db();
        assert!(db.get_history("nobody", None).unwrap().is_empty());
    }
}
