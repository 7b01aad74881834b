//! Contest entry workflow
//!
//! Per-user state machine: Uninitialized -> Collecting -> Completed
//! (terminal). All mutation goes through [`ContestService`], which owns the
//! store outright; audit publishing is fire-and-forget and a delivery
//! failure never changes an outcome.

pub mod messages;
pub mod store;

mod handler;

pub use handler::{ContestHandler, CONFIRM_ACTION};
pub use store::{ContestStats, SubmissionStore};

use std::sync::Arc;

use crate::domain::entities::{normalize_link, CanonicalLink, Participant};
use crate::domain::traits::AuditPublisher;

/// Links required before an entry can be confirmed.
pub const MIN_LINKS: usize = 3;

/// Result of a start interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Fresh record created, now collecting.
    Started,
    /// Already collecting; existing links are kept.
    Resumed { count: usize },
    /// Entry already confirmed, nothing to restart.
    AlreadyCompleted,
}

/// Result of a link submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted {
        link: CanonicalLink,
        count: usize,
        /// True once the entry can be confirmed; the handler surfaces the
        /// completion button on this.
        threshold_reached: bool,
    },
    Duplicate,
    InvalidFormat,
    /// No record, or entry already confirmed. Ignored silently upstream.
    Ignored,
}

/// Result of a completion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Completed { count: usize },
    NeedMoreLinks { have: usize },
    AlreadyCompleted,
    /// No record for this user. Ignored silently upstream.
    Ignored,
}

/// The submission state machine. One instance per process, handed by
/// reference into the event handler; no global state anywhere.
pub struct ContestService {
    store: SubmissionStore,
    audit: Arc<dyn AuditPublisher>,
    audit_channel: i64,
}

impl ContestService {
    pub fn new(audit: Arc<dyn AuditPublisher>, audit_channel: i64) -> Self {
        Self {
            store: SubmissionStore::new(),
            audit,
            audit_channel,
        }
    }

    /// Start (or resume) collecting for a participant.
    pub fn start(&mut self, participant: Participant) -> StartOutcome {
        match self.store.get(participant.id) {
            Some(record) if record.is_completed() => StartOutcome::AlreadyCompleted,
            Some(record) => StartOutcome::Resumed {
                count: record.link_count(),
            },
            None => {
                self.store.insert(participant);
                StartOutcome::Started
            }
        }
    }

    /// Validate and record one submitted link, publishing an audit event on
    /// acceptance.
    pub async fn submit_link(&mut self, user_id: i64, text: &str) -> SubmitOutcome {
        let Some(record) = self.store.get_mut(user_id) else {
            return SubmitOutcome::Ignored;
        };
        if record.is_completed() {
            return SubmitOutcome::Ignored;
        }

        let Some(link) = normalize_link(text) else {
            return SubmitOutcome::InvalidFormat;
        };
        if !record.add_link(link.clone()) {
            return SubmitOutcome::Duplicate;
        }

        let count = record.link_count();
        let event = messages::link_audit_event(&record.participant, &link);
        self.publish_audit(&event).await;

        SubmitOutcome::Accepted {
            link,
            count,
            threshold_reached: count >= MIN_LINKS,
        }
    }

    /// Confirm an entry. Only succeeds while collecting with enough links.
    pub async fn confirm(&mut self, user_id: i64) -> ConfirmOutcome {
        let Some(record) = self.store.get_mut(user_id) else {
            return ConfirmOutcome::Ignored;
        };
        if record.is_completed() {
            return ConfirmOutcome::AlreadyCompleted;
        }
        let have = record.link_count();
        if have < MIN_LINKS {
            return ConfirmOutcome::NeedMoreLinks { have };
        }

        record.complete();
        let event = messages::entry_audit_event(&record.participant, record.links());
        self.publish_audit(&event).await;

        ConfirmOutcome::Completed { count: have }
    }

    /// Read-only aggregate over all records.
    pub fn stats(&self) -> ContestStats {
        self.store.stats()
    }

    async fn publish_audit(&self, text: &str) {
        if let Err(e) = self.audit.publish(self.audit_channel, text).await {
            tracing::warn!("Failed to publish audit event: {}", e);
        }
    }
}
