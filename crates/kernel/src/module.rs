use async_trait::async_trait;
use axum::Router;
use stencil_telemetry::LoggerRegistry;

use crate::project::ProjectConfig;
use crate::settings::Settings;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
    pub project: &'a ProjectConfig,
    pub loggers: &'a LoggerRegistry,
}

/// A unit of the application: a set of routes plus lifecycle hooks
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Called during application startup, before the server is started
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes mounted under `/api/{module_name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// OpenAPI fragment (`paths` and `components.schemas`) merged into the app spec
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Start background work; called after every module is initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
