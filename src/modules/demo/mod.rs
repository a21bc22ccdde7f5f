//! Demo page exercising the shared helper library.

pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde_json::json;
use stencil_http::AppError;
use stencil_kernel::{InitCtx, Module};
use stencil_telemetry::{scoped_logger, LoggerHandle, LoggerRegistry};

use crate::utils;
use models::{EchoQuery, EchoResponse, FormatQuery, SumQuery, SumResponse};

const PAGE: &str = r#"<!doctype html>
<html>
<head><title>Demo App</title></head>
<body>
  <h1>Demo App - Package Import</h1>
  <p>Testing helpers from the shared utils library.</p>
  <h2>String Processing</h2>
  <form action="/api/demo/echo" method="get">
    <input name="text" placeholder="Enter something to check">
    <button type="submit">Check</button>
  </form>
  <h2>Number Calculation</h2>
  <form action="/api/demo/sum" method="get">
    <input name="numbers" placeholder="1,2,3,4,5">
    <button type="submit">Sum</button>
  </form>
</body>
</html>
"#;

#[derive(Clone)]
struct DemoState {
    loggers: LoggerRegistry,
}

/// The package-import demo page
pub struct DemoModule {
    loggers: LoggerRegistry,
    logger: LoggerHandle,
}

impl DemoModule {
    pub fn new(loggers: &LoggerRegistry) -> Self {
        Self {
            loggers: loggers.clone(),
            logger: scoped_logger!(loggers, class: Self, collapse),
        }
    }
}

#[async_trait]
impl Module for DemoModule {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.logger.info(format!(
            "demo app initialized in {:?} environment",
            ctx.settings.environment
        ));
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(page))
            .route("/echo", get(echo))
            .route("/sum", get(sum_numbers).post(sum_list))
            .route("/format", get(format_prefixed))
            .with_state(DemoState {
                loggers: self.loggers.clone(),
            })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let validation_error = json!({
            "description": "Validation error",
            "content": {
                "application/json": {
                    "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Demo page",
                        "tags": ["Demo"],
                        "responses": {
                            "200": {
                                "description": "HTML page",
                                "content": {"text/html": {"schema": {"type": "string"}}}
                            }
                        }
                    }
                },
                "/echo": {
                    "get": {
                        "summary": "Echo input through import_checking1",
                        "tags": ["Demo"],
                        "parameters": [{
                            "name": "text", "in": "query", "required": true,
                            "schema": {"type": "string"}
                        }],
                        "responses": {
                            "200": {
                                "description": "Echoed input",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/EchoResponse"}
                                    }
                                }
                            }
                        }
                    }
                },
                "/sum": {
                    "get": {
                        "summary": "Sum comma-separated numbers",
                        "tags": ["Demo"],
                        "parameters": [{
                            "name": "numbers", "in": "query", "required": true,
                            "schema": {"type": "string"}, "example": "1,2,3,4,5"
                        }],
                        "responses": {
                            "200": {
                                "description": "Sum and count",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/SumResponse"}
                                    }
                                }
                            },
                            "422": validation_error.clone()
                        }
                    },
                    "post": {
                        "summary": "Sum a JSON list of numbers",
                        "tags": ["Demo"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/SumRequest"}
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Sum and count",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/SumResponse"}
                                    }
                                }
                            },
                            "422": validation_error
                        }
                    }
                },
                "/format": {
                    "get": {
                        "summary": "Prefix a message",
                        "tags": ["Demo"],
                        "parameters": [
                            {
                                "name": "message", "in": "query", "required": true,
                                "schema": {"type": "string"}
                            },
                            {
                                "name": "prefix", "in": "query", "required": false,
                                "schema": {"type": "string"}
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Formatted message",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/EchoResponse"}
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "EchoResponse": {
                        "type": "object",
                        "properties": {"result": {"type": "string"}},
                        "required": ["result"]
                    },
                    "SumRequest": {
                        "type": "object",
                        "properties": {
                            "numbers": {"type": "array", "items": {"type": "number"}}
                        },
                        "required": ["numbers"]
                    },
                    "SumResponse": {
                        "type": "object",
                        "properties": {
                            "sum": {"type": "number"},
                            "count": {"type": "integer"}
                        },
                        "required": ["sum", "count"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.logger.info("demo app stopped");
        Ok(())
    }
}

async fn page() -> Html<&'static str> {
    Html(PAGE)
}

async fn echo(
    State(state): State<DemoState>,
    Query(query): Query<EchoQuery>,
) -> Json<EchoResponse> {
    let logger = scoped_logger!(state.loggers);
    logger.info(format!("processing user input: {}", utils::preview(&query.text)));

    Json(EchoResponse {
        result: utils::import_checking1(&query.text),
    })
}

async fn sum_numbers(
    State(state): State<DemoState>,
    Query(query): Query<SumQuery>,
) -> Result<Json<SumResponse>, AppError> {
    let logger = scoped_logger!(state.loggers);

    let numbers = utils::parse_numbers(&query.numbers).map_err(|err| {
        logger.error(format!("input parsing error: {err}"));
        AppError::validation(
            vec![json!({"field": "numbers", "error": err.to_string()})],
            "Please enter valid numbers separated by commas",
        )
    })?;

    logger.info(format!("calculating sum for {} numbers", numbers.len()));
    Ok(Json(SumResponse {
        sum: utils::sum(&numbers),
        count: numbers.len(),
    }))
}

/// JSON variant of `/sum`: `{"numbers": [1, 2, 3]}`
async fn sum_list(
    State(state): State<DemoState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SumResponse>, AppError> {
    let logger = scoped_logger!(state.loggers);
    let numbers = &body["numbers"];

    let sum = utils::calculate_sum(numbers).inspect_err(|err| {
        logger.error(format!("invalid numbers: {err}"));
    })?;

    Ok(Json(SumResponse {
        sum,
        count: numbers.as_array().map_or(0, Vec::len),
    }))
}

async fn format_prefixed(Query(query): Query<FormatQuery>) -> Json<EchoResponse> {
    Json(EchoResponse {
        result: utils::format_message(&query.message, query.prefix.as_deref()),
    })
}

/// Create a new instance of the demo module
pub fn create_module(loggers: &LoggerRegistry) -> Arc<dyn Module> {
    Arc::new(DemoModule::new(loggers))
}
