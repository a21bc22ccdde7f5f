use serde_json::Value;

use super::HelperError;

/// Sum of a JSON list of numbers.
///
/// Fails with [`HelperError::TypeMismatch`] when `numbers` is not a list and
/// with [`HelperError::Value`] when an item is not numeric.
pub fn calculate_sum(numbers: &Value) -> Result<f64, HelperError> {
    let items = numbers
        .as_array()
        .ok_or_else(|| HelperError::TypeMismatch("Input must be a list".to_string()))?;

    items
        .iter()
        .map(|item| {
            item.as_f64()
                .ok_or_else(|| HelperError::Value("All items in list must be numeric".to_string()))
        })
        .sum()
}

pub fn sum(numbers: &[f64]) -> f64 {
    numbers.iter().sum()
}

/// Parses comma-separated numbers, e.g. `"1, 2.5,3"`.
pub fn parse_numbers(input: &str) -> Result<Vec<f64>, HelperError> {
    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| HelperError::Value(format!("'{}' is not a number", part)))
        })
        .collect()
}
