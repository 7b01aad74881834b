mod link;
mod participant;
mod submission;

pub use link::{normalize_link, CanonicalLink};
pub use participant::Participant;
pub use submission::Submission;
