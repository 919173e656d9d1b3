//! Forwarding of contact form messages to the business owner.

use async_trait::async_trait;
use coachbook_core::models::contact::ContactMessage;
use eyre::{eyre, Result, WrapErr};
use serde_json::json;
use tracing::info;

use crate::config::WhatsAppConfig;

#[async_trait]
pub trait ContactRelay: Send + Sync {
    async fn deliver(&self, message: &ContactMessage) -> Result<()>;
}

/// Sends contact messages as WhatsApp text messages through the Cloud API.
pub struct WhatsAppRelay {
    client: reqwest::Client,
    config: WhatsAppConfig,
}

impl WhatsAppRelay {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/messages",
            self.config.api_base.trim_end_matches('/'),
            self.config.phone_id
        )
    }
}

#[async_trait]
impl ContactRelay for WhatsAppRelay {
    async fn deliver(&self, message: &ContactMessage) -> Result<()> {
        let body = json!({
            "messaging_product": "whatsapp",
            "to": self.config.receiver,
            "type": "text",
            "text": { "body": message.relay_text() },
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .await
            .wrap_err("Failed to reach the WhatsApp API")?;

        if !response.status().is_success() {
            let status = response.status();
            let details = response.text().await.unwrap_or_default();
            return Err(eyre!("WhatsApp API error {}: {}", status, details));
        }

        info!("Contact message from {} relayed", message.email);
        Ok(())
    }
}

/// Logs contact messages when no relay is configured.
#[derive(Debug, Default, Clone)]
pub struct LogRelay;

#[async_trait]
impl ContactRelay for LogRelay {
    async fn deliver(&self, message: &ContactMessage) -> Result<()> {
        info!(from = %message.email, "{}", message.relay_text());
        Ok(())
    }
}
