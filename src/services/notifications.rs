//! Notification dispatcher
//!
//! Fires formatted text messages at a configured chat-ops webhook on
//! status-change events. Delivery is fire-and-forget: sends run in a
//! spawned task and failures are logged, never surfaced to the caller.

use serde_json::json;

use crate::config::WebhookConfig;

#[derive(Clone)]
pub struct NotificationService {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl NotificationService {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: config.url,
        }
    }

    /// Dispatch a message. No-op when no webhook URL is configured.
    pub fn notify(&self, message: String) {
        let Some(url) = self.webhook_url.clone() else {
            tracing::debug!("Webhook not configured, dropping notification: {}", message);
            return;
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client
                .post(&url)
                .json(&json!({ "content": message }))
                .send()
                .await;
            match result {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!("Webhook returned {}", response.status());
                }
                Err(e) => {
                    tracing::warn!("Webhook delivery failed: {}", e);
                }
                _ => {}
            }
        });
    }

    pub fn loan_approved(&self, user_name: &str, equipment_name: &str) {
        self.notify(format!(
            "Loan approved: {} -> {}",
            equipment_name, user_name
        ));
    }

    pub fn loan_rejected(&self, user_name: &str, equipment_name: &str, reason: &str) {
        self.notify(format!(
            "Loan rejected: {} for {} ({})",
            equipment_name, user_name, reason
        ));
    }

    pub fn loan_returned(&self, user_name: &str, equipment_name: &str) {
        self.notify(format!(
            "Equipment returned: {} by {}",
            equipment_name, user_name
        ));
    }

    pub fn reservation_status_changed(&self, reservation_id: i32, status: &str) {
        self.notify(format!("Reservation #{} is now {}", reservation_id, status));
    }

    pub fn special_loan_created(&self, lecturer_name: &str, quantity: i32) {
        self.notify(format!(
            "Special loan created for {} ({} units)",
            lecturer_name, quantity
        ));
    }
}
