mod telemetry;

use telemetry::{get_subscriber, init_subscriber};
use tickler_api::Application;
use tickler_infra::setup_context;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("APP_ENV").as_deref() != Ok("production") {
        dotenvy::dotenv().ok();
    }

    let subscriber = get_subscriber("tickler".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context().await?;

    let app = Application::new(context).await?;
    app.start().await?;
    Ok(())
}
