mod date;
mod reminder;
mod shared;

pub use date::{format_time_left, truncate_to_minute, MINUTE_MILLIS};
pub use reminder::{
    compute_due_at, NewReminder, Reminder, ReminderPayload, TimeUnit, MAX_HORIZON_MINUTES,
};
pub use shared::entity::ID;
