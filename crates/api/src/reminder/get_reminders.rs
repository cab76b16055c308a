use crate::error::TicklerError;
use crate::shared::{
    auth::protect_route,
    remote::with_remote_timeout,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tickler_api_structs::get_reminders::{APIResponse, PathParams};
use tickler_domain::Reminder;
use tickler_infra::{Filter, TicklerContext};

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TicklerContext>,
) -> Result<HttpResponse, TicklerError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetRemindersUseCase {
        target_id: path_params.into_inner().target_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| {
            let now = ctx.sys.get_timestamp_millis();
            HttpResponse::Ok().json(APIResponse::new(reminders, now))
        })
        .map_err(TicklerError::from)
}

/// All the `Reminder`s of a target that have yet to fire, soonest first
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub target_id: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TicklerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &TicklerContext) -> Result<Self::Response, Self::Error> {
        let mut reminders = with_remote_timeout(
            ctx,
            ctx.repos
                .reminders
                .find_by(&[Filter::target_id_eq(&self.target_id)]),
        )
        .await
        .map_err(|_| UseCaseError::StorageError)?;

        reminders.sort_by_key(|r| r.due_at);
        Ok(reminders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{insert_reminder, setup_context, ts};

    #[tokio::test]
    async fn it_returns_target_reminders_soonest_first() {
        let ctx = setup_context(ts(12, 0, 0));
        insert_reminder(&ctx, "1", "late", ts(18, 0, 0)).await;
        insert_reminder(&ctx, "2", "other target", ts(13, 0, 0)).await;
        insert_reminder(&ctx, "1", "early", ts(12, 30, 0)).await;

        let mut usecase = GetRemindersUseCase {
            target_id: "1".into(),
        };
        let reminders = usecase.execute(&ctx).await.unwrap();
        let descriptions = reminders
            .iter()
            .map(|r| r.description.as_str())
            .collect::<Vec<_>>();
        assert_eq!(descriptions, vec!["early", "late"]);
    }

    #[tokio::test]
    async fn it_returns_nothing_for_unknown_target() {
        let ctx = setup_context(ts(12, 0, 0));
        let mut usecase = GetRemindersUseCase {
            target_id: "nobody".into(),
        };
        assert!(usecase.execute(&ctx).await.unwrap().is_empty());
    }
}
