use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use tickler_api_structs::*;
use tickler_domain::TimeUnit;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub target_id: String,
    pub user_name: String,
    pub description: String,
    pub context_prompt: Option<String>,
    pub time_value: f64,
    pub time_unit: TimeUnit,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            target_id: input.target_id,
            user_name: input.user_name,
            description: input.description,
            context_prompt: input.context_prompt,
            time_value: input.time_value,
            time_unit: input.time_unit,
        };

        self.base
            .post(body, "reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_by_target(&self, target_id: &str) -> APIResponse<get_reminders::APIResponse> {
        self.base
            .get(
                format!("reminders/{}", urlencoding::encode(target_id)),
                StatusCode::OK,
            )
            .await
    }
}
