use std::time::Duration;
use tickler_api::Application;
use tickler_infra::{Config, TicklerContext};
use tickler_sdk::TicklerSDK;

pub struct TestApp {
    pub address: String,
}

pub fn test_config(api_key: Option<&str>) -> Config {
    Config {
        port: 0, // Random port
        reminders_polling_interval: Duration::from_secs(60),
        reminders_alignment_offset_secs: 3,
        agent_api_url: "http://127.0.0.1:9".into(),
        agent_api_key: "agent-key".into(),
        remote_call_timeout: Duration::from_secs(5),
        api_key: api_key.map(String::from),
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, TicklerSDK) {
    spawn_app_with_config(test_config(None)).await
}

pub async fn spawn_app_with_config(config: Config) -> (TestApp, TicklerSDK) {
    let ctx = TicklerContext::create_inmemory(config.clone())
        .expect("Failed to create context.");
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = TicklerSDK::new(address.clone(), config.api_key.clone());
    let app = TestApp { address };
    (app, sdk)
}
