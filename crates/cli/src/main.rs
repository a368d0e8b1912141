use anyhow::Context;
use clap::{Parser, Subcommand};
use reel_kernel::settings::Settings;

/// Operator entrypoint for the Reel movie directory
#[derive(Debug, Parser)]
#[command(name = "reel", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document
    Openapi,
    /// Print the effective settings as JSON
    Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Reel settings")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            reel_telemetry::init(&settings.telemetry);
            tracing::info!(
                env = ?settings.environment,
                address = %settings.bind_address(),
                "reel serve starting"
            );
            reel_app::run(settings).await
        }
        Command::Openapi => {
            let document = reel_http::openapi_document(&reel_app::registry());
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}
