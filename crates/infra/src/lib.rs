mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, ConfigError};
use repos::Repos;
pub use repos::{
    DeleteResult, Filter, FilterOperator, FilterValue, IReminderRepo, ReminderField,
};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct TicklerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub dispatcher: Arc<dyn IReminderDispatcher>,
}

struct ContextParams {
    pub config: Config,
    pub postgres_connection_string: Option<String>,
}

impl TicklerContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match &params.postgres_connection_string {
            Some(connection_string) => {
                Repos::create_postgres(connection_string, params.config.remote_call_timeout)
                    .await?
            }
            None => {
                warn!("Did not find DATABASE_URL environment variable. Reminders will only be stored in memory.");
                Repos::create_inmemory()
            }
        };
        let dispatcher = Self::create_dispatcher(&params.config)?;

        Ok(Self {
            repos,
            config: params.config,
            sys: Arc::new(RealSys {}),
            dispatcher,
        })
    }

    pub fn create_inmemory(config: Config) -> anyhow::Result<Self> {
        let dispatcher = Self::create_dispatcher(&config)?;
        Ok(Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            dispatcher,
        })
    }

    fn create_dispatcher(config: &Config) -> anyhow::Result<Arc<dyn IReminderDispatcher>> {
        let dispatcher = AgentApiDispatcher::new(
            &config.agent_api_url,
            &config.agent_api_key,
            config.remote_call_timeout,
        )?;
        Ok(Arc::new(dispatcher))
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<TicklerContext> {
    TicklerContext::create(ContextParams {
        config: Config::new()?,
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .ok()
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        port: 0,
        reminders_polling_interval: std::time::Duration::from_secs(60),
        reminders_alignment_offset_secs: 3,
        agent_api_url: "http://127.0.0.1:9".into(),
        agent_api_key: "test".into(),
        remote_call_timeout: std::time::Duration::from_secs(1),
        api_key: None,
    }
}
