//! Audit channel publishers
//!
//! Delivery is best-effort by contract: the contest service logs a failed
//! publish and never retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::errors::AuditError;
use crate::domain::traits::AuditPublisher;

const API_BASE: &str = "https://api.telegram.org";

/// Publishes audit events to a Telegram channel via sendMessage.
pub struct ChannelAuditPublisher {
    token: String,
    client: Client,
}

impl ChannelAuditPublisher {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl AuditPublisher for ChannelAuditPublisher {
    async fn publish(&self, channel_id: i64, text: &str) -> Result<(), AuditError> {
        #[derive(Serialize)]
        struct SendMessageRequest {
            chat_id: i64,
            text: String,
            parse_mode: String,
            disable_web_page_preview: bool,
        }

        let url = format!("{}/bot{}/sendMessage", API_BASE, self.token);
        let request = SendMessageRequest {
            chat_id: channel_id,
            text: text.to_string(),
            parse_mode: "HTML".to_string(),
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AuditError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuditError::Rejected(format!("{}: {}", status, body)));
        }

        Ok(())
    }
}

/// Writes audit events to the process log instead of a channel. Used by
/// console mode.
pub struct LogAuditPublisher;

#[async_trait]
impl AuditPublisher for LogAuditPublisher {
    async fn publish(&self, channel_id: i64, text: &str) -> Result<(), AuditError> {
        tracing::info!("[audit:{}] {}", channel_id, text);
        Ok(())
    }
}
