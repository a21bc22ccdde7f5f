//! Logging for Stencil projects.
//!
//! Loggers are named after the code that uses them: `module.function`,
//! `module.Type.method`, or `module.Type` for constructors when collapsed.
//! Names come from a [`CallContext`] captured at the call site, and handles
//! come from an explicit [`LoggerRegistry`].
//!
//! ```ignore
//! use stencil_telemetry::{scoped_logger, LoggerRegistry};
//!
//! fn start(loggers: &LoggerRegistry) {
//!     let logger = scoped_logger!(loggers);
//!     logger.info("starting"); // logged as `app.start`
//! }
//! ```

pub mod context;
pub mod name;
pub mod registry;
pub mod setup;
pub mod sink;

pub use context::{CallContext, Receiver};
pub use name::{LoggerName, NameError};
pub use registry::{LoggerHandle, LoggerRegistry};
pub use setup::{LogFormat, TelemetrySettings};
pub use sink::{LogSink, MemorySink, Record, TracingSink};

pub use tracing::level_filters::LevelFilter;
pub use tracing::Level;
