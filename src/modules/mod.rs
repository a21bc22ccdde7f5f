pub mod demo;
pub mod text;

use stencil_kernel::{ModuleRegistry, ProjectConfig};
use stencil_telemetry::LoggerRegistry;

/// Register the demo pages, unless the project turned them off
pub fn register_all(
    registry: &mut ModuleRegistry,
    project: &ProjectConfig,
    loggers: &LoggerRegistry,
) -> anyhow::Result<()> {
    if !project.project.include_demo_apps {
        tracing::info!("demo apps disabled by project configuration");
        return Ok(());
    }

    registry.register(demo::create_module(loggers))?;
    registry.register(text::create_module(loggers))?;
    Ok(())
}
