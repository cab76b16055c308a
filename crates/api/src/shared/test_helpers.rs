use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tickler_domain::{NewReminder, Reminder, ReminderPayload};
use tickler_infra::{Config, IReminderDispatcher, ISys, TicklerContext};

pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

/// Remembers every batch it is asked to deliver
#[derive(Default)]
pub struct RecordingDispatcher {
    batches: Mutex<Vec<Vec<ReminderPayload>>>,
    fail: AtomicBool,
}

impl RecordingDispatcher {
    pub fn failing() -> Self {
        let dispatcher = Self::default();
        dispatcher.set_failing(true);
        dispatcher
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn batches(&self) -> Vec<Vec<ReminderPayload>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IReminderDispatcher for RecordingDispatcher {
    async fn dispatch(&self, batch: &[ReminderPayload]) -> anyhow::Result<()> {
        self.batches.lock().unwrap().push(batch.to_vec());
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("Agent api is down");
        }
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        port: 0,
        reminders_polling_interval: Duration::from_secs(60),
        reminders_alignment_offset_secs: 3,
        agent_api_url: "http://127.0.0.1:9".into(),
        agent_api_key: "test".into(),
        remote_call_timeout: Duration::from_secs(5),
        api_key: None,
    }
}

/// Inmemory context frozen at `now` which records dispatched batches
pub fn setup_context(now: i64) -> TicklerContext {
    setup_context_with_dispatcher(now, Arc::new(RecordingDispatcher::default()))
}

pub fn setup_context_with_dispatcher(
    now: i64,
    dispatcher: Arc<dyn IReminderDispatcher>,
) -> TicklerContext {
    let mut ctx = TicklerContext::create_inmemory(test_config()).unwrap();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx.dispatcher = dispatcher;
    ctx
}

/// Timestamp in millis on 2024-01-01 at the given UTC time
pub fn ts(hour: u32, min: u32, sec: u32) -> i64 {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, min, sec)
        .unwrap()
        .timestamp_millis()
}

pub async fn insert_reminder(
    ctx: &TicklerContext,
    target_id: &str,
    description: &str,
    due_at: i64,
) -> Reminder {
    ctx.repos
        .reminders
        .insert(&NewReminder {
            target_id: target_id.into(),
            name: "alice".into(),
            description: description.into(),
            context_prompt: None,
            due_at,
        })
        .await
        .unwrap()
}
