use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct EchoQuery {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EchoResponse {
    pub result: String,
}

/// Comma-separated numbers, e.g. `1,2,3,4,5`.
#[derive(Debug, Clone, Deserialize)]
pub struct SumQuery {
    pub numbers: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SumResponse {
    pub sum: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormatQuery {
    pub message: String,
    #[serde(default)]
    pub prefix: Option<String>,
}
