use anyhow::Context;
use reel_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Reel settings")?;
    reel_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        address = %settings.bind_address(),
        "reel-app bootstrap starting"
    );

    reel_app::run(settings).await?;

    tracing::info!("reel-app shutdown complete");
    Ok(())
}
