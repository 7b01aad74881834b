//! In-memory submission store
//!
//! One record per participant, created on the first start interaction and
//! never deleted. The store is owned by the contest service and passed by
//! reference into handlers; process lifetime only, nothing is persisted.

use std::collections::HashMap;

use crate::domain::entities::{Participant, Submission};

/// Aggregate counters over all records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContestStats {
    pub total_users: usize,
    pub completed_users: usize,
    pub total_links: usize,
}

/// Map from participant id to submission record.
#[derive(Debug, Default)]
pub struct SubmissionStore {
    records: HashMap<i64, Submission>,
}

impl SubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: i64) -> Option<&Submission> {
        self.records.get(&user_id)
    }

    pub fn get_mut(&mut self, user_id: i64) -> Option<&mut Submission> {
        self.records.get_mut(&user_id)
    }

    /// Create an empty record for the participant. An existing record is
    /// returned untouched; callers decide whether it may be replaced.
    pub fn insert(&mut self, participant: Participant) -> &mut Submission {
        self.records
            .entry(participant.id)
            .or_insert_with(|| Submission::new(participant))
    }

    pub fn stats(&self) -> ContestStats {
        ContestStats {
            total_users: self.records.len(),
            completed_users: self.records.values().filter(|s| s.is_completed()).count(),
            total_links: self.records.values().map(|s| s.link_count()).sum(),
        }
    }
}
