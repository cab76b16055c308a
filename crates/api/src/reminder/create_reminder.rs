use crate::error::TicklerError;
use crate::shared::{
    auth::protect_route,
    remote::with_remote_timeout,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tickler_api_structs::create_reminder::{APIResponse, RequestBody};
use tickler_domain::{compute_due_at, NewReminder, Reminder, TimeUnit, MAX_HORIZON_MINUTES};
use tickler_infra::{Filter, TicklerContext};
use tracing::{error, info};

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TicklerContext>,
) -> Result<HttpResponse, TicklerError> {
    protect_route(&http_req, &ctx)?;

    let body = body.into_inner();
    let usecase = CreateReminderUseCase {
        target_id: body.target_id,
        user_name: body.user_name,
        description: body.description,
        context_prompt: body.context_prompt,
        time_value: body.time_value,
        time_unit: body.time_unit,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| {
            let now = ctx.sys.get_timestamp_millis();
            HttpResponse::Created().json(APIResponse::new(reminder, now))
        })
        .map_err(TicklerError::from)
}

/// Registers a `Reminder` that fires `time_value` `time_unit`s from now
#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub target_id: String,
    pub user_name: String,
    pub description: String,
    pub context_prompt: Option<String>,
    pub time_value: f64,
    pub time_unit: TimeUnit,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidInput(String),
    /// The target already has a `Reminder` with the same description
    Duplicate,
    StorageError,
}

impl From<UseCaseError> for TicklerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidInput(msg) => Self::BadClientData(msg),
            UseCaseError::Duplicate => Self::Conflict("Reminder already exists".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl CreateReminderUseCase {
    fn validate(&self) -> Result<(), UseCaseError> {
        if self.target_id.trim().is_empty() {
            return Err(UseCaseError::InvalidInput(
                "The target id can not be empty".into(),
            ));
        }
        if !self.time_value.is_finite() || self.time_value <= 0.0 {
            return Err(UseCaseError::InvalidInput(format!(
                "The time value has to be a positive number, got: {}",
                self.time_value
            )));
        }
        Ok(())
    }

    fn due_at(&self, now: i64) -> Result<i64, UseCaseError> {
        compute_due_at(now, self.time_value, self.time_unit).ok_or_else(|| {
            UseCaseError::InvalidInput(format!(
                "A reminder can be set at most {} days ahead, got: {} {:?}",
                MAX_HORIZON_MINUTES / TimeUnit::Days.minutes(),
                self.time_value,
                self.time_unit
            ))
        })
    }
}

#[async_trait::async_trait]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &TicklerContext) -> Result<Self::Response, Self::Error> {
        self.validate()?;
        let due_at = self.due_at(ctx.sys.get_timestamp_millis())?;

        info!(
            target_id = %self.target_id,
            description = %self.description,
            time_value = self.time_value,
            time_unit = ?self.time_unit,
            "Attempting to store reminder"
        );

        // Not transactional, two concurrent requests can both get past this check
        let current_reminders = with_remote_timeout(
            ctx,
            ctx.repos
                .reminders
                .find_by(&[Filter::target_id_eq(&self.target_id)]),
        )
        .await
        .map_err(|e| {
            error!(
                target_id = %self.target_id,
                description = %self.description,
                "Error fetching current reminders: {:?}",
                e
            );
            UseCaseError::StorageError
        })?;

        if current_reminders
            .iter()
            .any(|r| r.description == self.description)
        {
            info!(target_id = %self.target_id, "Reminder already exists");
            return Err(UseCaseError::Duplicate);
        }

        let reminder = NewReminder {
            target_id: self.target_id.clone(),
            name: self.user_name.clone(),
            description: self.description.clone(),
            context_prompt: self.context_prompt.clone(),
            due_at,
        };

        with_remote_timeout(ctx, ctx.repos.reminders.insert(&reminder))
            .await
            .map_err(|e| {
                error!(
                    target_id = %self.target_id,
                    description = %self.description,
                    "Error setting up reminder: {:?}",
                    e
                );
                UseCaseError::StorageError
            })
    }
}
