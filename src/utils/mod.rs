//! Example helpers used by the demo modules.

pub mod numbers;
pub mod text;

use thiserror::Error;

pub use numbers::{calculate_sum, parse_numbers, sum};
pub use text::{
    format_message, import_checking1, import_checking2, preview, process_text, validate_input,
    TextAnalysis,
};

#[derive(Debug, Error, PartialEq)]
pub enum HelperError {
    /// The input has the wrong shape, e.g. an object where a list was expected.
    #[error("{0}")]
    TypeMismatch(String),
    /// The input has the right shape but unusable content.
    #[error("{0}")]
    Value(String),
}

impl From<HelperError> for stencil_http::AppError {
    fn from(err: HelperError) -> Self {
        stencil_http::AppError::validation(Vec::new(), err.to_string())
    }
}
