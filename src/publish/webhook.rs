use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

#[derive(Debug, Serialize)]
struct ExecutePayload<'a> {
    content: &'a str,
}

/// Chat webhook that posts and deletes messages
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

fn retry_strategy() -> impl Iterator<Item = std::time::Duration> {
    // Exponential backoff with 3 attempts
    ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .take(3)
}

impl WebhookClient {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("season-standings/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Post a message and return its id
    pub async fn execute(&self, content: &str) -> Result<String> {
        let url = execute_url(&self.url);
        let payload = ExecutePayload { content };

        let body: serde_json::Value = Retry::spawn(retry_strategy(), || async {
            let response = self
                .client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| anyhow!("Webhook request failed: {}", e))?
                .error_for_status()
                .map_err(|e| anyhow!("Webhook rejected message: {}", e))?;
            response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| anyhow!("Failed to parse webhook response: {}", e))
        })
        .await?;

        message_id(&body)
    }

    /// Delete a previously posted message
    pub async fn delete(&self, message_id: &str) -> Result<()> {
        let url = message_url(&self.url, message_id);

        Retry::spawn(retry_strategy(), || async {
            self.client
                .delete(&url)
                .send()
                .await
                .map_err(|e| anyhow!("Webhook request failed: {}", e))?
                .error_for_status()
                .map_err(|e| anyhow!("Failed to delete message {}: {}", message_id, e))?;
            Ok::<(), anyhow::Error>(())
        })
        .await
    }
}

/// Execute URL that waits for the created message in the response
pub fn execute_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.contains('?') {
        format!("{}&wait=true", base)
    } else {
        format!("{}?wait=true", base)
    }
}

pub fn message_url(base: &str, message_id: &str) -> String {
    format!("{}/messages/{}", base.trim_end_matches('/'), message_id)
}

/// Pull the message id out of an execute response.
/// Ids arrive as strings, but accept numbers too.
pub fn message_id(body: &serde_json::Value) -> Result<String> {
    match body.get("id") {
        Some(serde_json::Value::String(id)) => Ok(id.clone()),
        Some(serde_json::Value::Number(id)) => Ok(id.to_string()),
        _ => anyhow::bail!("Webhook response has no message id"),
    }
}
