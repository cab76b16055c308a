mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

use crate::repos::shared::{query_structs::Filter, repo::DeleteResult};
use tickler_domain::{NewReminder, Reminder};

/// The only persistence the reminders core depends on
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// All `Reminder`s matching every given `Filter`, in store order
    async fn find_by(&self, filters: &[Filter]) -> anyhow::Result<Vec<Reminder>>;
    /// Persists the `Reminder` and returns it with the id the store assigned
    async fn insert(&self, reminder: &NewReminder) -> anyhow::Result<Reminder>;
    /// Deletes all `Reminder`s matching every given `Filter`.
    /// Refuses to run without any `Filter`s.
    async fn delete_by(&self, filters: &[Filter]) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::repos::shared::query_structs::Filter;
    use crate::{test_config, ContextParams, TicklerContext};
    use tickler_domain::NewReminder;

    /// Creates an inmemory context and, when DATABASE_URL is set,
    /// a postgres context as well
    async fn create_contexts() -> Vec<TicklerContext> {
        let mut contexts = vec![TicklerContext::create_inmemory(test_config()).unwrap()];
        if let Ok(connection_string) = std::env::var("DATABASE_URL") {
            let params = ContextParams {
                config: test_config(),
                postgres_connection_string: Some(connection_string),
            };
            contexts.push(TicklerContext::create(params).await.unwrap());
        }
        contexts
    }

    fn new_reminder(target_id: &str, description: &str, due_at: i64) -> NewReminder {
        NewReminder {
            target_id: target_id.into(),
            name: "alice".into(),
            description: description.into(),
            context_prompt: Some("be brief".into()),
            due_at,
        }
    }

    #[tokio::test]
    async fn insert_and_find() {
        for ctx in create_contexts().await {
            let target = tickler_domain::ID::default().as_string();
            let reminder = ctx
                .repos
                .reminders
                .insert(&new_reminder(&target, "drink water", 60_000))
                .await
                .unwrap();
            assert_eq!(reminder.target_id, target);
            assert_eq!(reminder.context_prompt, Some("be brief".into()));

            let found = ctx
                .repos
                .reminders
                .find_by(&[Filter::target_id_eq(&target)])
                .await
                .unwrap();
            assert_eq!(found, vec![reminder.clone()]);

            let found = ctx
                .repos
                .reminders
                .find_by(&[Filter::id_in(&[reminder.id.clone()])])
                .await
                .unwrap();
            assert_eq!(found.len(), 1);

            ctx.repos
                .reminders
                .delete_by(&[Filter::target_id_eq(&target)])
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn delete_by_filters() {
        for ctx in create_contexts().await {
            let target = tickler_domain::ID::default().as_string();
            let repo = &ctx.repos.reminders;
            let due = repo
                .insert(&new_reminder(&target, "due", 60_000))
                .await
                .unwrap();
            let later = repo
                .insert(&new_reminder(&target, "later", 120_000))
                .await
                .unwrap();

            let filters = [Filter::target_id_eq(&target), Filter::due_at_lte(60_000)];
            let found = repo.find_by(&filters).await.unwrap();
            assert_eq!(found, vec![due.clone()]);

            let res = repo.delete_by(&filters).await.unwrap();
            assert_eq!(res.deleted_count, 1);
            assert!(repo.find_by(&filters).await.unwrap().is_empty());

            let remaining = repo
                .find_by(&[Filter::target_id_eq(&target)])
                .await
                .unwrap();
            assert_eq!(remaining, vec![later]);

            repo.delete_by(&[Filter::target_id_eq(&target)])
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn delete_without_filters_is_refused() {
        for ctx in create_contexts().await {
            assert!(ctx.repos.reminders.delete_by(&[]).await.is_err());
        }
    }
}
