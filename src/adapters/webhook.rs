use crate::domain::ports::BookingNotifier;
use crate::utils::error::{Result, TravelError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 聊天室 webhook：POST `{"content": "..."}`
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl BookingNotifier for WebhookNotifier {
    async fn notify(&self, content: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        tracing::error!("Webhook rejected notification ({}): {}", status, message);
        Err(TravelError::Notification {
            status: status.as_u16(),
            message,
        })
    }
}
