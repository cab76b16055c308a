use reqwest::Client;
use std::time::Duration;
use tickler_domain::ReminderPayload;
use tracing::error;

/// Delivers due reminders to whoever is going to act on them
#[async_trait::async_trait]
pub trait IReminderDispatcher: Send + Sync {
    /// Delivers the whole batch in a single call
    async fn dispatch(&self, batch: &[ReminderPayload]) -> anyhow::Result<()>;
}

/// Delivers reminders to the agent api which messages the targets
pub struct AgentApiDispatcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AgentApiDispatcher {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn reminders_url(&self) -> String {
        format!("{}/reminders", self.base_url)
    }
}

#[async_trait::async_trait]
impl IReminderDispatcher for AgentApiDispatcher {
    async fn dispatch(&self, batch: &[ReminderPayload]) -> anyhow::Result<()> {
        match self
            .client
            .post(self.reminders_url())
            .header("x-api-key", &self.api_key)
            .json(batch)
            .send()
            .await
        {
            Ok(res) => res.error_for_status().map(|_| ()).map_err(|e| {
                error!(
                    "[Unexpected Response] Agent API POST reminders error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Agent API POST reminders error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}
