mod base;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use reminder::ReminderClient;
pub use reminder::CreateReminderInput;
use status::StatusClient;
use std::sync::Arc;
pub use tickler_api_structs::dtos::ReminderDTO as Reminder;
pub use tickler_domain::{TimeUnit, ID};

/// Tickler Server SDK
///
/// The SDK contains methods for interacting with the Tickler server
/// API.
#[derive(Clone)]
pub struct TicklerSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl TicklerSDK {
    pub fn new(address: String, api_key: Option<String>) -> Self {
        let mut base = BaseClient::new(address);
        if let Some(api_key) = api_key {
            base.set_api_key(api_key);
        }
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminder, status }
    }
}
