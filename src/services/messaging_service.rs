// src/services/messaging_service.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing;

use crate::utils::id_generator::IdGenerator;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Gateway rejected message (status {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Recipient number is empty")]
    EmptyRecipient,
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Http(err.to_string())
    }
}

/// Proof that a gateway accepted a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryReceipt {
    pub id: String,
    pub channel: String,
    pub recipient: String,
    pub sent_at: DateTime<Utc>,
}

impl DeliveryReceipt {
    fn issue(channel: &str, recipient: &str) -> Self {
        Self {
            id: IdGenerator::receipt_id(),
            channel: channel.to_string(),
            recipient: recipient.to_string(),
            sent_at: Utc::now(),
        }
    }
}

/// Outbound channel for customer messages. `recipient` is already normalized.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, recipient: &str, message: &str) -> Result<DeliveryReceipt, GatewayError>;
}

// Simulated delivery: the message only goes to the log.
#[derive(Debug, Default)]
pub struct LogGateway;

#[async_trait]
impl NotificationGateway for LogGateway {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<DeliveryReceipt, GatewayError> {
        tracing::info!(recipient, message, "[SIMULATED] WhatsApp message");
        Ok(DeliveryReceipt::issue(self.name(), recipient))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub recipient: String,
    pub message: String,
}

/// Keeps every message in memory. Used by tests and message previews.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    outbox: Mutex<Vec<SentMessage>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentMessage> {
        self.outbox.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.outbox.lock().await.clear();
    }
}

#[async_trait]
impl NotificationGateway for MemoryGateway {
    fn name(&self) -> &str {
        "memory"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<DeliveryReceipt, GatewayError> {
        self.outbox.lock().await.push(SentMessage {
            recipient: recipient.to_string(),
            message: message.to_string(),
        });
        Ok(DeliveryReceipt::issue(self.name(), recipient))
    }
}

#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub api_url: String,
    pub api_token: String,
}

pub const DEFAULT_WHATSAPP_API_URL: &str = "https://api.fonnte.com/send";

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_WHATSAPP_API_URL.to_string(),
            api_token: String::new(),
        }
    }
}

/// Sends through an HTTP WhatsApp provider.
pub struct WhatsAppGateway {
    config: WhatsAppConfig,
    client: reqwest::Client,
}

impl WhatsAppGateway {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_token(api_token: String) -> Self {
        Self::new(WhatsAppConfig {
            api_token,
            ..Default::default()
        })
    }
}

#[async_trait]
impl NotificationGateway for WhatsAppGateway {
    fn name(&self) -> &str {
        "whatsapp"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<DeliveryReceipt, GatewayError> {
        if recipient.trim().is_empty() {
            return Err(GatewayError::EmptyRecipient);
        }

        tracing::info!("Sending WhatsApp message to: {}", recipient);

        let payload = json!({
            "target": recipient,
            "message": message,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", &self.config.api_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("WhatsApp request failed ({}): {}", status, body);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("WhatsApp message accepted for {}", recipient);
        Ok(DeliveryReceipt::issue(self.name(), recipient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_gateway_always_succeeds() {
        let receipt = LogGateway.send("62812345", "Halo").await.unwrap();
        assert_eq!(receipt.channel, "log");
        assert_eq!(receipt.recipient, "62812345");
        assert!(IdGenerator::is_receipt_id(&receipt.id));
    }

    #[tokio::test]
    async fn test_memory_gateway_records_in_order() {
        let gateway = MemoryGateway::new();
        gateway.send("6281", "satu").await.unwrap();
        gateway.send("6282", "dua").await.unwrap();

        let sent = gateway.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], SentMessage { recipient: "6281".into(), message: "satu".into() });
        assert_eq!(sent[1].message, "dua");

        gateway.clear().await;
        assert!(gateway.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_whatsapp_rejects_empty_recipient() {
        let gateway = WhatsAppGateway::with_token("token".to_string());
        let err = gateway.send("  ", "Halo").await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyRecipient));
    }

    #[tokio::test]
    async fn test_whatsapp_unreachable_host_is_http_error() {
        let gateway = WhatsAppGateway::new(WhatsAppConfig {
            api_url: "http://127.0.0.1:1/send".to_string(),
            api_token: "token".to_string(),
        });
        let err = gateway.send("62812345", "Halo").await.unwrap_err();
        assert!(matches!(err, GatewayError::Http(_)));
    }
}
