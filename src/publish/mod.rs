pub mod messages;
pub mod webhook;

pub use messages::{append_output, existing_message_ids, matrix_output};
pub use webhook::WebhookClient;

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Publishing settings taken from the environment
#[derive(Debug, Clone, Default)]
pub struct PublishEnv {
    pub webhook_url: Option<String>,
    pub site_url: Option<String>,
    pub existing_ids: Vec<String>,
    pub github_output: Option<PathBuf>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl PublishEnv {
    pub fn from_env() -> Self {
        Self {
            webhook_url: non_empty(env::var("WEBHOOK_URL").ok()),
            site_url: non_empty(env::var("SITE_URL").ok()),
            existing_ids: existing_message_ids(|key| env::var(key).ok()),
            github_output: non_empty(env::var("GITHUB_OUTPUT").ok()).map(PathBuf::from),
        }
    }
}

/// Replace the previously published messages with `posts`.
///
/// Old messages are deleted first, then each post is sent in order.
/// Returns the new message ids.
pub async fn publish_posts(client: &WebhookClient, posts: &[String], existing_ids: &[String]) -> Result<Vec<String>> {
    for id in existing_ids {
        client
            .delete(id)
            .await
            .with_context(|| format!("Failed to delete message {}", id))?;
        tracing::debug!(message_id = %id, "deleted message");
    }

    let mut ids = Vec::with_capacity(posts.len());
    for (idx, post) in posts.iter().enumerate() {
        let id = client
            .execute(post)
            .await
            .with_context(|| format!("Failed to send post {} of {}", idx + 1, posts.len()))?;
        tracing::debug!(message_id = %id, "sent post {}", idx + 1);
        ids.push(id);
    }

    tracing::info!("Published {} post(s)", ids.len());
    Ok(ids)
}

/// Hand the new message ids to the workflow, or print them when not in one.
pub fn report_message_ids(ids: &[String], github_output: Option<&std::path::Path>) -> Result<()> {
    let line = matrix_output(ids)?;
    match github_output {
        Some(path) => append_output(path, &line),
        None => {
            println!("{}", line);
            Ok(())
        }
    }
}
