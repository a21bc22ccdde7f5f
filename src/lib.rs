//! Stencil demo application
//!
//! Example helpers and the demo pages built on the Stencil kernel.

pub mod modules;
pub mod utils;

pub use utils::HelperError;
