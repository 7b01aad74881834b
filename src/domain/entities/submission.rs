use super::{CanonicalLink, Participant};

/// Per-user contest entry: the collected links and completion status.
///
/// Invariants: `links` never holds duplicates, and `completed` transitions
/// false -> true exactly once. Records are created on the first start
/// interaction and never deleted.
#[derive(Debug, Clone)]
pub struct Submission {
    pub participant: Participant,
    links: Vec<CanonicalLink>,
    completed: bool,
}

impl Submission {
    pub fn new(participant: Participant) -> Self {
        Self {
            participant,
            links: Vec::new(),
            completed: false,
        }
    }

    pub fn links(&self) -> &[CanonicalLink] {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Append a link, preserving submission order. Returns `false` when the
    /// link is already present or the entry is completed.
    pub fn add_link(&mut self, link: CanonicalLink) -> bool {
        if self.completed || self.links.contains(&link) {
            return false;
        }
        self.links.push(link);
        true
    }

    /// Mark the entry as completed. Irreversible.
    pub fn complete(&mut self) {
        self.completed = true;
    }
}
