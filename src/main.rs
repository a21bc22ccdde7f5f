use anyhow::Context;
use stencil_app::modules;
use stencil_kernel::{InitCtx, ModuleRegistry, ProjectConfig, Settings};
use stencil_telemetry::{scoped_logger, LoggerRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load settings")?;
    stencil_telemetry::setup::init(&settings.telemetry)
        .with_context(|| "failed to initialize logging")?;

    let loggers = LoggerRegistry::with_sink_and_level(
        std::sync::Arc::new(stencil_telemetry::TracingSink),
        settings.telemetry.level_filter()?,
    );
    let logger = scoped_logger!(loggers);

    let project = ProjectConfig::load().with_context(|| "failed to read project configuration")?;

    tracing::info!(
        env = ?settings.environment,
        project_config = ?project.source(),
        "stencil-app bootstrap starting"
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &project, &loggers)?;

    let ctx = InitCtx {
        settings: &settings,
        project: &project,
        loggers: &loggers,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;
    logger.info(format!("{} modules running", registry.len()));

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    };
    let served = stencil_http::start_server(&registry, &settings, shutdown).await;

    registry.stop_all().await?;
    logger.info("stencil-app stopped");
    served
}
