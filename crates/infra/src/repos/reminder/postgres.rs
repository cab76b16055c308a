use super::IReminderRepo;
use crate::repos::shared::{
    query_structs::{Filter, FilterOperator, FilterValue, ReminderField},
    repo::DeleteResult,
};
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, QueryBuilder};
use tickler_domain::{NewReminder, Reminder};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    target_id: String,
    name: String,
    description: String,
    context_prompt: Option<String>,
    due_at: i64,
}

impl From<ReminderRaw> for Reminder {
    fn from(r: ReminderRaw) -> Self {
        Self {
            id: r.reminder_uid.into(),
            target_id: r.target_id,
            name: r.name,
            description: r.description,
            context_prompt: r.context_prompt,
            due_at: r.due_at,
        }
    }
}

fn column(field: ReminderField) -> &'static str {
    match field {
        ReminderField::Id => "reminder_uid",
        ReminderField::TargetId => "target_id",
        ReminderField::Description => "description",
        ReminderField::DueAt => "due_at",
    }
}

fn parse_uuid(value: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(value).map_err(|_| anyhow::anyhow!("Malformed reminder id: {}", value))
}

/// Appends the filters as a WHERE clause with bound parameters
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) -> anyhow::Result<()> {
    for (i, filter) in filters.iter().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });
        query.push(column(filter.field));

        match filter.operator {
            FilterOperator::Eq | FilterOperator::Lte => {
                if filter.operator == FilterOperator::Eq {
                    query.push(" = ");
                } else {
                    query.push(" <= ");
                }
                match (filter.field, &filter.value) {
                    (ReminderField::Id, FilterValue::Text(id)) => {
                        query.push_bind(parse_uuid(id)?);
                    }
                    (ReminderField::DueAt, FilterValue::Timestamp(ts)) => {
                        query.push_bind(*ts);
                    }
                    (ReminderField::TargetId, FilterValue::Text(text))
                    | (ReminderField::Description, FilterValue::Text(text)) => {
                        query.push_bind(text.clone());
                    }
                    _ => anyhow::bail!("Filter value does not fit the field: {:?}", filter),
                }
            }
            FilterOperator::In => {
                let values = match &filter.value {
                    FilterValue::List(values) => values,
                    _ => anyhow::bail!("The in operator expects a list: {:?}", filter),
                };
                query.push(" = ANY(");
                match filter.field {
                    ReminderField::Id => {
                        let ids = values
                            .iter()
                            .map(|id| parse_uuid(id))
                            .collect::<anyhow::Result<Vec<_>>>()?;
                        query.push_bind(ids);
                    }
                    ReminderField::TargetId | ReminderField::Description => {
                        query.push_bind(values.clone());
                    }
                    ReminderField::DueAt => {
                        anyhow::bail!("Filter value does not fit the field: {:?}", filter)
                    }
                }
                query.push(")");
            }
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn find_by(&self, filters: &[Filter]) -> anyhow::Result<Vec<Reminder>> {
        let mut query = QueryBuilder::new("SELECT * FROM reminders");
        push_filters(&mut query, filters)?;

        let reminders: Vec<ReminderRaw> = query
            .build_query_as::<ReminderRaw>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find reminders with filters: {:?} failed. DB returned error: {:?}",
                    filters, e
                );
                e
            })?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn insert(&self, reminder: &NewReminder) -> anyhow::Result<Reminder> {
        let raw: ReminderRaw = sqlx::query_as(
            r#"
            INSERT INTO reminders
            (target_id, name, description, context_prompt, due_at)
            VALUES($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&reminder.target_id)
        .bind(&reminder.name)
        .bind(&reminder.description)
        .bind(&reminder.context_prompt)
        .bind(reminder.due_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;

        Ok(raw.into())
    }

    async fn delete_by(&self, filters: &[Filter]) -> anyhow::Result<DeleteResult> {
        if filters.is_empty() {
            anyhow::bail!("Refusing to delete reminders without any filters");
        }

        let mut query = QueryBuilder::new("DELETE FROM reminders");
        push_filters(&mut query, filters)?;

        let res = query.build().execute(&self.pool).await.map_err(|e| {
            error!(
                "Delete reminders with filters: {:?} failed. DB returned error: {:?}",
                filters, e
            );
            e
        })?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
