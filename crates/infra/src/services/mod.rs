mod agent_api;

pub use agent_api::{AgentApiDispatcher, IReminderDispatcher};
