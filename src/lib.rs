// Library entry so integration tests can reference the same modules as the
// binary (`main.rs`).
pub mod application;
pub mod domain;
pub mod infrastructure;
