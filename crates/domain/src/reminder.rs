use crate::date::{truncate_to_minute, MINUTE_MILLIS};
use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};

/// The unit of the relative time given when registering a `Reminder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// How many minutes one of this unit is
    pub fn minutes(&self) -> i64 {
        match self {
            Self::Minutes => 1,
            Self::Hours => 60,
            Self::Days => 60 * 24,
        }
    }
}

/// Reminders can not be set further ahead than this, roughly a hundred years
pub const MAX_HORIZON_MINUTES: i64 = 100 * 365 * 24 * 60;

/// Computes the absolute due timestamp of a reminder registered at `now`
/// which should fire `time_value` `unit`s later. The result is always
/// truncated to a whole minute.
///
/// Returns `None` when the offset is not a finite number or lies beyond
/// `MAX_HORIZON_MINUTES`.
pub fn compute_due_at(now: i64, time_value: f64, unit: TimeUnit) -> Option<i64> {
    let minutes = (time_value * unit.minutes() as f64).round();
    if !minutes.is_finite() || minutes.abs() > MAX_HORIZON_MINUTES as f64 {
        return None;
    }
    let offset = (minutes as i64).checked_mul(MINUTE_MILLIS)?;
    now.checked_add(offset).map(truncate_to_minute)
}

/// A `Reminder` that has not been persisted yet and therefore has no id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReminder {
    /// The user or channel that should receive the `Reminder`
    pub target_id: String,
    /// Display name of the requester at the time of creation
    pub name: String,
    /// What the reminder is about
    pub description: String,
    /// Extra context handed to the agent when the `Reminder` fires
    pub context_prompt: Option<String>,
    /// Timestamp in millis (UTC) at which the `Reminder` is due
    pub due_at: i64,
}

/// A `Reminder` is a message that should be delivered to a target
/// once `due_at` has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    /// Assigned by the store on insert
    pub id: ID,
    pub target_id: String,
    pub name: String,
    pub description: String,
    pub context_prompt: Option<String>,
    pub due_at: i64,
}

impl Reminder {
    pub fn from_new(id: ID, reminder: NewReminder) -> Self {
        Self {
            id,
            target_id: reminder.target_id,
            name: reminder.name,
            description: reminder.description,
            context_prompt: reminder.context_prompt,
            due_at: reminder.due_at,
        }
    }
}

/// What gets delivered to the agent for each due `Reminder`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    pub target_id: String,
    pub user_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_prompt: Option<String>,
}

impl From<&Reminder> for ReminderPayload {
    fn from(r: &Reminder) -> Self {
        Self {
            target_id: r.target_id.clone(),
            user_name: r.name.clone(),
            description: r.description.clone(),
            context_prompt: r.context_prompt.clone(),
        }
    }
}
