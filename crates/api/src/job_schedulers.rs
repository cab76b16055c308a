use crate::{reminder::SendDueRemindersUseCase, shared::usecase::execute};
use std::sync::Arc;
use std::time::Duration;
use tickler_infra::TicklerContext;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

/// Time left from `now_ts` until the next point in time that lies `offset_secs`
/// past a whole minute.
pub fn get_start_delay(now_ts: i64, offset_secs: u64) -> Duration {
    let offset_millis = offset_secs as i64 * 1000;
    let millis_into_minute = now_ts.rem_euclid(60 * 1000);
    let delay = if millis_into_minute < offset_millis {
        offset_millis - millis_into_minute
    } else {
        60 * 1000 - millis_into_minute + offset_millis
    };
    Duration::from_millis(delay as u64)
}

/// Polls for due reminders on a fixed interval. Only the first poll is aligned
/// to the minute, later polls follow the interval.
pub struct ReminderScheduler;

pub struct ReminderSchedulerHandle {
    task: JoinHandle<()>,
}

impl ReminderSchedulerHandle {
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}

impl ReminderScheduler {
    pub fn start(ctx: TicklerContext) -> ReminderSchedulerHandle {
        let start_delay = get_start_delay(
            ctx.sys.get_timestamp_millis(),
            ctx.config.reminders_alignment_offset_secs,
        );
        let period = ctx.config.reminders_polling_interval;
        info!(
            "Polling for due reminders in {:?} and then every {:?}",
            start_delay, period
        );

        let task = tokio::spawn(async move {
            let in_flight: Arc<Mutex<()>> = Arc::default();
            let mut ticker = interval_at(Instant::now() + start_delay, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;

                let usecase = SendDueRemindersUseCase {
                    in_flight: Arc::clone(&in_flight),
                };
                let _ = execute(usecase, &ctx).await;
            }
        });

        ReminderSchedulerHandle { task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        insert_reminder, setup_context_with_dispatcher, ts, RecordingDispatcher,
    };
    use tokio::time::sleep;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(ts(12, 0, 7), 3), Duration::from_secs(56));
        assert_eq!(get_start_delay(ts(12, 0, 1), 3), Duration::from_secs(2));
        assert_eq!(get_start_delay(ts(12, 0, 3), 3), Duration::from_secs(60));
        assert_eq!(get_start_delay(ts(12, 0, 59), 0), Duration::from_secs(1));
        assert_eq!(get_start_delay(ts(12, 0, 0), 0), Duration::from_secs(60));
        assert_eq!(
            get_start_delay(ts(12, 0, 7) + 250, 3),
            Duration::from_millis(55_750)
        );
        assert_eq!(
            get_start_delay(ts(12, 0, 1) + 400, 3),
            Duration::from_millis(1_600)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn first_poll_is_aligned() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let ctx = setup_context_with_dispatcher(ts(12, 0, 7), dispatcher.clone());
        insert_reminder(&ctx, "1", "due", ts(12, 0, 0)).await;

        let handle = ReminderScheduler::start(ctx);

        sleep(Duration::from_secs(55)).await;
        assert!(dispatcher.batches().is_empty());

        sleep(Duration::from_secs(2)).await;
        assert_eq!(dispatcher.batches().len(), 1);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_polling_after_failed_dispatch() {
        let dispatcher = Arc::new(RecordingDispatcher::failing());
        let ctx = setup_context_with_dispatcher(ts(12, 0, 7), dispatcher.clone());
        insert_reminder(&ctx, "1", "due", ts(12, 0, 0)).await;

        let handle = ReminderScheduler::start(ctx.clone());

        sleep(Duration::from_secs(57)).await;
        assert_eq!(dispatcher.batches().len(), 1);
        assert!(!handle.is_stopped());

        dispatcher.set_failing(false);
        sleep(Duration::from_secs(60)).await;
        assert_eq!(dispatcher.batches().len(), 2);
        assert!(ctx.repos.reminders.find_by(&[]).await.unwrap().is_empty());

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stops_polling_when_stopped() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let ctx = setup_context_with_dispatcher(ts(12, 0, 7), dispatcher.clone());
        insert_reminder(&ctx, "1", "due", ts(12, 0, 0)).await;

        let handle = ReminderScheduler::start(ctx);
        handle.stop();

        sleep(Duration::from_secs(600)).await;
        assert!(dispatcher.batches().is_empty());
        assert!(handle.is_stopped());
    }
}
