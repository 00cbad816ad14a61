use anyhow::Context;
use audio_fetch::{configuration::Settings, startup::Application, telemetry::init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the variables directly.
    dotenvy::dotenv().ok();
    init_subscriber();

    let configuration = Settings::new().context("Failed to read configuration.")?;

    let app = Application::build(configuration)
        .await
        .context("Failed to build application.")?;

    app.run_until_stopped().await?;
    Ok(())
}
