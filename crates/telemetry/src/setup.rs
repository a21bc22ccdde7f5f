//! Subscriber bootstrap for binaries.
//!
//! Only entry points should call these; libraries just emit events.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Package whose events are kept at the requested level.
pub const PACKAGE_TARGET: &str = "stencil";

/// Crates quieted during development.
const DEV_QUIET: &[&str] = &["hyper", "h2", "tower"];

/// Crates quieted in production.
const PROD_QUIET: &[&str] = &["hyper", "hyper_util", "h2", "tower", "tower_http", "mio"];

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default = "TelemetrySettings::default_level")]
    pub level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// When set, logs also go to this file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl TelemetrySettings {
    fn default_level() -> String {
        "info".to_string()
    }

    pub fn level_filter(&self) -> anyhow::Result<LevelFilter> {
        self.level
            .parse::<LevelFilter>()
            .with_context(|| format!("invalid telemetry level '{}'", self.level))
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            log_format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

/// Builds the filter directives: package crates at `level`, noisy crates at `warn`.
pub fn filter_directives(level: LevelFilter, quiet: &[&str]) -> String {
    let mut directives = vec![level.to_string(), format!("{PACKAGE_TARGET}={level}")];
    directives.extend(quiet.iter().map(|target| format!("{target}=warn")));
    directives.join(",").to_lowercase()
}

fn env_filter(level: LevelFilter, quiet: &[&str]) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(filter_directives(level, quiet)).context("invalid log filter directives")
}

/// Console logging to stderr for development and tests.
pub fn init_development(level: LevelFilter, include_timestamp: bool) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level, DEV_QUIET)?)
        .with_writer(std::io::stderr);

    let installed = if include_timestamp {
        builder.try_init()
    } else {
        builder.without_time().try_init()
    };
    installed.map_err(|err| anyhow::anyhow!(err))?;

    tracing::info!(%level, "development logging configured");
    Ok(())
}

/// Logging to `log_file` and stdout.
pub fn init_production(
    log_file: &Path,
    level: LevelFilter,
    format: &LogFormat,
) -> anyhow::Result<()> {
    let file = open_log_file(log_file)?;
    let writer = std::io::stdout.and(Mutex::new(file));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level, PROD_QUIET)?)
        .with_ansi(false)
        .with_writer(writer);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|err| anyhow::anyhow!(err))?;

    tracing::info!(path = %log_file.display(), "production logging configured");
    Ok(())
}

/// Picks production logging when a log file is configured.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let level = settings.level_filter()?;
    match &settings.log_file {
        Some(path) => init_production(path, level, &settings.log_format),
        None => init_development(level, true),
    }
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
