use super::IReminderRepo;
use crate::repos::shared::{
    inmemory_repo::*,
    query_structs::{matches_all, Filter},
    repo::DeleteResult,
};
use tickler_domain::{NewReminder, Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn find_by(&self, filters: &[Filter]) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| matches_all(filters, r)))
    }

    async fn insert(&self, reminder: &NewReminder) -> anyhow::Result<Reminder> {
        let reminder = Reminder::from_new(ID::default(), reminder.clone());
        insert(&reminder, &self.reminders);
        Ok(reminder)
    }

    async fn delete_by(&self, filters: &[Filter]) -> anyhow::Result<DeleteResult> {
        if filters.is_empty() {
            anyhow::bail!("Refusing to delete reminders without any filters");
        }
        Ok(delete_by(&self.reminders, |r| matches_all(filters, r)))
    }
}
