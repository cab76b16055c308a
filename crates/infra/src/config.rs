use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_PORT: usize = 5000;
const DEFAULT_ALIGNMENT_OFFSET_SECS: u64 = 3;
const DEFAULT_REMOTE_CALL_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("The `{0}` environment variable is required")]
    Missing(&'static str),
    #[error("The `{name}` environment variable has an invalid value: `{value}`. {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the due reminders are polled for after the first
    /// aligned poll
    pub reminders_polling_interval: Duration,
    /// The first poll happens this many seconds past a minute boundary.
    /// Reminders are always due at whole minutes so a small offset makes sure
    /// that the poll lands right after they become due.
    pub reminders_alignment_offset_secs: u64,
    /// Base url of the agent api that due reminders are delivered to
    pub agent_api_url: String,
    /// Sent as the `x-api-key` header when delivering reminders
    pub agent_api_key: String,
    /// Upper bound for every remote call done by the reminders job, i.e. the store
    /// reads and deletes and the delivery call.
    pub remote_call_timeout: Duration,
    /// When set, every request to the api must provide it in the `x-api-key` header
    pub api_key: Option<String>,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
            None => DEFAULT_PORT,
        };

        let polling_interval_secs = required(&lookup, "REMINDERS_POLLING_INTERVAL_SECS")?;
        let polling_interval_secs =
            parse_secs("REMINDERS_POLLING_INTERVAL_SECS", polling_interval_secs)?;
        if polling_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "REMINDERS_POLLING_INTERVAL_SECS",
                value: polling_interval_secs.to_string(),
                reason: "Must be greater than zero.",
            });
        }

        let reminders_alignment_offset_secs = match lookup("REMINDERS_ALIGNMENT_OFFSET_SECS") {
            Some(offset) => {
                let offset = parse_secs("REMINDERS_ALIGNMENT_OFFSET_SECS", offset)?;
                if offset >= 60 {
                    return Err(ConfigError::Invalid {
                        name: "REMINDERS_ALIGNMENT_OFFSET_SECS",
                        value: offset.to_string(),
                        reason: "Must be less than 60.",
                    });
                }
                offset
            }
            None => DEFAULT_ALIGNMENT_OFFSET_SECS,
        };

        let agent_api_url = required(&lookup, "AGENT_API_URL")?;
        match url::Url::parse(&agent_api_url) {
            Ok(url) if ["http", "https"].contains(&url.scheme()) => (),
            _ => {
                return Err(ConfigError::Invalid {
                    name: "AGENT_API_URL",
                    value: agent_api_url,
                    reason: "Must be a http or https url.",
                })
            }
        }
        let agent_api_key = required(&lookup, "AGENT_API_KEY")?;

        let remote_call_timeout_secs = match lookup("REMOTE_CALL_TIMEOUT_SECS") {
            Some(timeout) => {
                let timeout = parse_secs("REMOTE_CALL_TIMEOUT_SECS", timeout)?;
                if timeout == 0 {
                    return Err(ConfigError::Invalid {
                        name: "REMOTE_CALL_TIMEOUT_SECS",
                        value: timeout.to_string(),
                        reason: "Must be greater than zero.",
                    });
                }
                timeout
            }
            None => DEFAULT_REMOTE_CALL_TIMEOUT_SECS,
        };

        let api_key = lookup("TICKLER_API_KEY").filter(|key| !key.is_empty());
        if api_key.is_none() {
            info!("Did not find TICKLER_API_KEY environment variable. The api will be open.");
        }

        Ok(Self {
            port,
            reminders_polling_interval: Duration::from_secs(polling_interval_secs),
            reminders_alignment_offset_secs,
            agent_api_url,
            agent_api_key,
            remote_call_timeout: Duration::from_secs(remote_call_timeout_secs),
            api_key,
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parse_secs(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
        name,
        value,
        reason: "Must be a whole number of seconds.",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("REMINDERS_POLLING_INTERVAL_SECS", "60"),
            ("AGENT_API_URL", "https://agent.example.com"),
            ("AGENT_API_KEY", "secret"),
        ]
    }

    #[test]
    fn it_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&required_vars())).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.reminders_polling_interval, Duration::from_secs(60));
        assert_eq!(config.reminders_alignment_offset_secs, 3);
        assert_eq!(config.remote_call_timeout, Duration::from_secs(10));
        assert_eq!(config.agent_api_url, "https://agent.example.com");
        assert_eq!(config.agent_api_key, "secret");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn it_reads_optional_values() {
        let mut vars = required_vars();
        vars.push(("PORT", "8080"));
        vars.push(("REMINDERS_ALIGNMENT_OFFSET_SECS", "10"));
        vars.push(("REMOTE_CALL_TIMEOUT_SECS", "3"));
        vars.push(("TICKLER_API_KEY", "inbound"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.reminders_alignment_offset_secs, 10);
        assert_eq!(config.remote_call_timeout, Duration::from_secs(3));
        assert_eq!(config.api_key, Some("inbound".to_string()));
    }

    #[test]
    fn it_falls_back_on_invalid_port() {
        let mut vars = required_vars();
        vars.push(("PORT", "not-a-port"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn it_rejects_missing_required_values() {
        for missing in [
            "REMINDERS_POLLING_INTERVAL_SECS",
            "AGENT_API_URL",
            "AGENT_API_KEY",
        ] {
            let vars = required_vars()
                .into_iter()
                .filter(|(k, _)| *k != missing)
                .collect::<Vec<_>>();
            let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
            assert_eq!(err, ConfigError::Missing(missing));
        }
    }

    #[test]
    fn it_rejects_invalid_values() {
        let cases = [
            ("REMINDERS_POLLING_INTERVAL_SECS", "0"),
            ("REMINDERS_POLLING_INTERVAL_SECS", "1.5"),
            ("REMINDERS_POLLING_INTERVAL_SECS", "-60"),
            ("REMINDERS_ALIGNMENT_OFFSET_SECS", "60"),
            ("AGENT_API_URL", "agent.example.com"),
            ("AGENT_API_URL", "ftp://agent.example.com"),
            ("REMOTE_CALL_TIMEOUT_SECS", "soon"),
            ("REMOTE_CALL_TIMEOUT_SECS", "0"),
        ];
        for (name, value) in cases {
            let mut vars = required_vars()
                .into_iter()
                .filter(|(k, _)| *k != name)
                .collect::<Vec<_>>();
            vars.push((name, value));
            let res = Config::from_lookup(lookup_from(&vars));
            assert!(
                matches!(res, Err(ConfigError::Invalid { name: n, .. }) if n == name),
                "{}={} should be rejected",
                name,
                value
            );
        }
    }
}
