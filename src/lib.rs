//! Lyrical Pages application library
//!
//! Catalog browsing, reviews with rating aggregation, mock sessions and
//! related-book suggestions, served as Axum modules.

pub mod error;
pub mod modules;
pub mod services;
pub mod utils;

use anyhow::Context;
use axum::Router;
use lyrical_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub use services::Services;

/// Build a registry with every module registered
pub fn build_registry(services: &Services) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, services)?;
    Ok(registry)
}

/// Full HTTP application for the given services, without binding a socket
pub fn build_app(services: &Services, settings: &Settings) -> anyhow::Result<Router> {
    let registry = build_registry(services)?;
    Ok(lyrical_http::build_router(&registry, settings))
}

/// Run the server until Ctrl-C
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let services = Services::from_settings(&settings)?;
    lyrical_db::log_store_summary(&services.store)
        .await
        .context("failed to open store")?;

    let registry = build_registry(&services)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = lyrical_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry.stop_all().await?;
    served
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
