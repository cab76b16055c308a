use crate::dtos::ReminderDTO;
use serde::{Deserialize, Serialize};
use tickler_domain::{Reminder, TimeUnit};

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub target_id: String,
        pub user_name: String,
        pub description: String,
        #[serde(default)]
        pub context_prompt: Option<String>,
        /// Decimals represent fractions, e.g. 9.5 hours
        pub time_value: f64,
        pub time_unit: TimeUnit,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub reminder: ReminderDTO,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder, now: i64) -> Self {
            Self {
                message: "Reminder correctly set up.".into(),
                reminder: ReminderDTO::new(reminder, now),
            }
        }
    }
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub target_id: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>, now: i64) -> Self {
            Self {
                reminders: reminders
                    .into_iter()
                    .map(|r| ReminderDTO::new(r, now))
                    .collect(),
            }
        }
    }
}
