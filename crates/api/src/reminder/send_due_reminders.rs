use crate::shared::{remote::with_remote_timeout, usecase::UseCase};
use std::sync::Arc;
use tickler_domain::ReminderPayload;
use tickler_infra::{Filter, TicklerContext};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Finds every `Reminder` that is due and delivers them to the agent api
/// in a single batch. Delivered `Reminder`s are removed from the store,
/// `Reminder`s that failed to be delivered stay and are retried on the next run.
///
/// Never fails, every problem is logged and ends the run.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {
    /// Held for the whole run so that overlapping runs are skipped
    pub in_flight: Arc<Mutex<()>>,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[derive(Debug, PartialEq)]
pub enum PollOutcome {
    /// Another run was still in progress
    Skipped,
    /// Nothing was due
    Idle,
    /// The store could not be read
    StoreUnavailable,
    /// This many reminders were delivered
    Dispatched(usize),
    /// This many reminders were due but could not be delivered
    DispatchFailed(usize),
}

#[async_trait::async_trait]
impl UseCase for SendDueRemindersUseCase {
    type Response = PollOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &TicklerContext) -> Result<Self::Response, Self::Error> {
        let _in_flight = match self.in_flight.try_lock() {
            Ok(lock) => lock,
            Err(_) => {
                warn!("Previous run of sending due reminders is still in progress, skipping");
                return Ok(PollOutcome::Skipped);
            }
        };

        let now = ctx.sys.get_timestamp_millis();
        let due_reminders = match with_remote_timeout(
            ctx,
            ctx.repos.reminders.find_by(&[Filter::due_at_lte(now)]),
        )
        .await
        {
            Ok(reminders) => reminders,
            Err(e) => {
                error!("Error fetching due reminders: {:?}", e);
                return Ok(PollOutcome::StoreUnavailable);
            }
        };

        if due_reminders.is_empty() {
            return Ok(PollOutcome::Idle);
        }

        let batch = due_reminders
            .iter()
            .map(ReminderPayload::from)
            .collect::<Vec<_>>();
        if let Err(e) = with_remote_timeout(ctx, ctx.dispatcher.dispatch(&batch)).await {
            error!(
                "Error informing agent of {} due reminders, keeping them for the next run: {:?}",
                batch.len(),
                e
            );
            return Ok(PollOutcome::DispatchFailed(batch.len()));
        }

        // Only what was delivered, reminders that became due in the meantime wait for the next run
        let delivered = due_reminders
            .iter()
            .map(|r| r.id.clone())
            .collect::<Vec<_>>();
        match with_remote_timeout(
            ctx,
            ctx.repos.reminders.delete_by(&[Filter::id_in(&delivered)]),
        )
        .await
        {
            Ok(res) => info!(
                "Successfully triggered {} reminders, removed {}",
                batch.len(),
                res.deleted_count
            ),
            Err(e) => error!(
                "Triggered {} reminders but failed to remove them, they will be sent again: {:?}",
                batch.len(),
                e
            ),
        }

        Ok(PollOutcome::Dispatched(batch.len()))
    }
}
