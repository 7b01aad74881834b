use async_trait::async_trait;
use crate::application::errors::AuditError;

/// Best-effort delivery of formatted event text to a fixed audit channel.
/// Failures are non-fatal: callers log and move on, no retries.
#[async_trait]
pub trait AuditPublisher: Send + Sync {
    async fn publish(&self, channel_id: i64, text: &str) -> Result<(), AuditError>;
}
