//! WhatsApp gateway HTTP client.
//!
//! Talks to a self-hosted WhatsApp API service over plain JSON. All
//! failures surface as `Channel` errors so the sender can itemize them
//! without aborting a batch.

use async_trait::async_trait;

use rawat_core::config::WaConfig;
use rawat_core::error::{RawatError, Result};
use rawat_core::traits::MessageGateway;
use rawat_core::types::SendReceipt;

/// Client for the WhatsApp API service endpoints:
/// `POST {base}/messages`, `POST {base}/messages/group`,
/// `POST {base}/messages/template`, `PUT {base}/messages/{id}/template`,
/// `DELETE {base}/messages/{id}`, `GET {base}/groups`.
pub struct WaGatewayClient {
    base_url: String,
    client: reqwest::Client,
}

impl WaGatewayClient {
    pub fn new(config: &WaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| RawatError::Channel(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: reqwest::RequestBuilder, what: &str) -> Result<serde_json::Value> {
        let response = request
            .send()
            .await
            .map_err(|e| RawatError::Channel(format!("{what} request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RawatError::Channel(format!(
                "{what} error {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RawatError::Channel(format!("Invalid {what} response: {e}")))
    }

    async fn post_json(&self, path: &str, body: serde_json::Value, what: &str) -> Result<SendReceipt> {
        let raw = self
            .execute(self.client.post(self.url(path)).json(&body), what)
            .await?;
        Ok(SendReceipt::from_response(raw))
    }
}

#[async_trait]
impl MessageGateway for WaGatewayClient {
    async fn send_message(&self, phone: &str, text: &str) -> Result<SendReceipt> {
        tracing::debug!("Sending WhatsApp message to {phone}");
        self.post_json(
            "/messages",
            serde_json::json!({
                "phoneNumber": phone,
                "message": text,
            }),
            "WhatsApp send",
        )
        .await
    }

    async fn send_group_message(&self, group_id: &str, text: &str) -> Result<SendReceipt> {
        tracing::debug!("Sending WhatsApp group message to {group_id}");
        self.post_json(
            "/messages/group",
            serde_json::json!({
                "groupId": group_id,
                "message": text,
            }),
            "WhatsApp group send",
        )
        .await
    }

    async fn send_template_message(
        &self,
        template_name: &str,
        variables: &serde_json::Value,
        group_id: &str,
    ) -> Result<SendReceipt> {
        self.post_json(
            "/messages/template",
            serde_json::json!({
                "templateName": template_name,
                "data": variables,
                "groupId": group_id,
            }),
            "WhatsApp template send",
        )
        .await
    }

    async fn update_template_message(
        &self,
        message_id: &str,
        template_name: &str,
        variables: &serde_json::Value,
        group_id: &str,
    ) -> Result<SendReceipt> {
        let raw = self
            .execute(
                self.client
                    .put(self.url(&format!("/messages/{message_id}/template")))
                    .json(&serde_json::json!({
                        "templateName": template_name,
                        "data": variables,
                        "groupId": group_id,
                    })),
                "WhatsApp template update",
            )
            .await?;
        Ok(SendReceipt::from_response(raw))
    }

    async fn delete_message(&self, message_id: &str) -> Result<SendReceipt> {
        let raw = self
            .execute(
                self.client.delete(self.url(&format!("/messages/{message_id}"))),
                "WhatsApp delete",
            )
            .await?;
        Ok(SendReceipt::from_response(raw))
    }

    async fn list_groups(&self) -> Result<serde_json::Value> {
        self.execute(self.client.get(self.url("/groups")), "WhatsApp groups")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let config = WaConfig {
            base_url: "http://localhost:3920/api/".into(),
            request_timeout_secs: 5,
        };
        let client = WaGatewayClient::new(&config).unwrap();
        assert_eq!(client.url("/messages"), "http://localhost:3920/api/messages");
        assert_eq!(
            client.url("/messages/abc/template"),
            "http://localhost:3920/api/messages/abc/template"
        );
    }

    #[test]
    fn test_default_config_builds_a_client() {
        assert!(WaGatewayClient::new(&WaConfig::default()).is_ok());
    }
}
