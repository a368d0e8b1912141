//! Reel application library
//!
//! Hosts the movie directory module and the bootstrap shared by the
//! `reel-app` and `reel` binaries.

pub mod modules;

pub use modules::movies;

use anyhow::Context;
use axum::Router;
use reel_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build a registry holding every application module
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Initialize all modules and assemble the HTTP router over them
pub async fn build_app(settings: &Settings) -> anyhow::Result<(ModuleRegistry, Router)> {
    let registry = registry();
    let ctx = InitCtx { settings };

    registry
        .init_all(&ctx)
        .await
        .context("failed to initialize modules")?;

    let router = reel_http::build_router(&registry, settings);
    Ok((registry, router))
}

/// Run the service until a shutdown signal arrives
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let (registry, app) = build_app(&settings).await?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .start_all(&ctx)
        .await
        .context("failed to start modules")?;

    let served = reel_http::start_server(app, &settings).await;

    registry
        .stop_all()
        .await
        .context("failed to stop modules")?;

    served
}
