//! Text analysis demo page.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use stencil_http::AppError;
use stencil_kernel::{InitCtx, Module};
use stencil_telemetry::{scoped_logger, LoggerHandle, LoggerRegistry};

use super::demo::models::{EchoQuery, EchoResponse};
use crate::utils::{self, TextAnalysis};

const MIN_TEXT_LENGTH: usize = 1;

const PAGE: &str = r#"<!doctype html>
<html>
<head><title>Demo Sub App</title></head>
<body>
  <h1>Demo App - Text Analysis</h1>
  <h2>String Processing</h2>
  <form action="/api/text/echo" method="get">
    <input name="text" placeholder="Enter something to check">
    <button type="submit">Check</button>
  </form>
  <h2>Text Analysis</h2>
  <textarea id="analysis" rows="5" cols="60"></textarea>
  <button onclick="analyze()">Analyze</button>
  <pre id="result"></pre>
  <script>
    async function analyze() {
      const text = document.getElementById("analysis").value;
      const response = await fetch("/api/text/analyze", {
        method: "POST",
        headers: {"content-type": "application/json"},
        body: JSON.stringify({text}),
      });
      document.getElementById("result").textContent =
        JSON.stringify(await response.json(), null, 2);
    }
  </script>
</body>
</html>
"#;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Clone)]
struct TextState {
    loggers: LoggerRegistry,
}

/// Text analysis demo page
pub struct TextModule {
    loggers: LoggerRegistry,
    logger: LoggerHandle,
}

impl TextModule {
    pub fn new(loggers: &LoggerRegistry) -> Self {
        Self {
            loggers: loggers.clone(),
            logger: scoped_logger!(loggers, class: Self, collapse),
        }
    }
}

#[async_trait]
impl Module for TextModule {
    fn name(&self) -> &'static str {
        "text"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.logger.info("text demo initialized");
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(page))
            .route("/echo", get(echo))
            .route("/analyze", post(analyze))
            .with_state(TextState {
                loggers: self.loggers.clone(),
            })
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Text demo page",
                        "tags": ["Text"],
                        "responses": {"200": {"description": "HTML page"}}
                    }
                },
                "/echo": {
                    "get": {
                        "summary": "Echo input through import_checking2",
                        "tags": ["Text"],
                        "parameters": [{
                            "name": "text", "in": "query", "required": true,
                            "schema": {"type": "string"}
                        }],
                        "responses": {"200": {"description": "Echoed input"}}
                    }
                },
                "/analyze": {
                    "post": {
                        "summary": "Count words and characters",
                        "tags": ["Text"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {"text": {"type": "string"}},
                                        "required": ["text"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Analysis result",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/TextAnalysis"}
                                    }
                                }
                            },
                            "422": {
                                "description": "Input validation failed",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "TextAnalysis": {
                        "type": "object",
                        "properties": {
                            "word_count": {"type": "integer"},
                            "char_count": {"type": "integer"},
                            "processed_at": {"type": "string", "format": "date-time"},
                            "original_text": {"type": "string"}
                        },
                        "required": ["word_count", "char_count", "processed_at", "original_text"]
                    }
                }
            }
        }))
    }
}

async fn page() -> Html<&'static str> {
    Html(PAGE)
}

async fn echo(
    State(state): State<TextState>,
    Query(query): Query<EchoQuery>,
) -> Json<EchoResponse> {
    let logger = scoped_logger!(state.loggers);
    logger.info(format!("processing user input: {}", utils::preview(&query.text)));

    Json(EchoResponse {
        result: utils::import_checking2(&query.text),
    })
}

async fn analyze(
    State(state): State<TextState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<TextAnalysis>, AppError> {
    let logger = scoped_logger!(state.loggers);
    logger.info(format!(
        "starting text analysis for {} characters",
        request.text.chars().count()
    ));

    if !utils::validate_input(&request.text, MIN_TEXT_LENGTH) {
        logger.warn("input validation failed");
        return Err(AppError::validation(
            vec![json!({"field": "text", "error": "must not be blank"})],
            "Input validation failed",
        ));
    }

    Ok(Json(utils::process_text(&request.text)))
}

/// Create a new instance of the text module
pub fn create_module(loggers: &LoggerRegistry) -> Arc<dyn Module> {
    Arc::new(TextModule::new(loggers))
}
