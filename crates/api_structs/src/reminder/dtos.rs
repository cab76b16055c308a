use serde::{Deserialize, Serialize};
use tickler_domain::{format_time_left, Reminder, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub target_id: String,
    pub user_name: String,
    pub description: String,
    pub context_prompt: Option<String>,
    pub due_at: i64,
    /// Whole days, hours and minutes left until the reminder is due
    pub time_left: String,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder, now: i64) -> Self {
        Self {
            time_left: format_time_left(now, reminder.due_at),
            id: reminder.id,
            target_id: reminder.target_id,
            user_name: reminder.name,
            description: reminder.description,
            context_prompt: reminder.context_prompt,
            due_at: reminder.due_at,
        }
    }
}
