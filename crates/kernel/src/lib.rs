//! Configuration, settings, and module lifecycle for Stencil projects.

pub mod module;
pub mod project;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use project::{ConfigError, ProjectConfig};
pub use registry::ModuleRegistry;
pub use settings::Settings;
