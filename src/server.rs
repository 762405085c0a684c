// http server mode - run nlsite as an api
// classification and plan generation only; commands never execute here

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::core::{Step, StepKind, parse_artifact};
use crate::{Ai, ChatMessage, Error, Provider};

struct AppState {
    ai: Ai,
}

#[derive(Deserialize)]
struct TemplateRequest {
    prompt: String,
}

#[derive(Serialize)]
struct TemplateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    prompts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ui_prompts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<StepSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// what a caller needs to render a plan without the file contents
#[derive(Serialize)]
struct StepSummary {
    id: usize,
    title: String,
    kind: StepKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl From<&Step> for StepSummary {
    fn from(step: &Step) -> Self {
        Self {
            id: step.id,
            title: step.title.clone(),
            kind: step.kind,
            path: step.path.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub struct Server;

impl Server {
    pub async fn run(
        provider: Provider,
        api_key: Option<String>,
        host: &str,
        port: u16,
    ) -> Result<(), Error> {
        let ai = Ai::new(provider, api_key)?;
        let state = Arc::new(AppState { ai });

        let app = Router::new()
            .route("/health", get(health))
            .route("/template", post(template))
            .route("/chat", post(chat))
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = format!("{host}:{port}");
        println!("server running at http://{addr}");
        log::info!("serving /template and /chat at {addr}");

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn template(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TemplateRequest>,
) -> (StatusCode, Json<TemplateResponse>) {
    match state.ai.classify_template(&req.prompt).await {
        Ok(kind) => (
            StatusCode::OK,
            Json(TemplateResponse {
                template: Some(kind.name()),
                prompts: kind.prompts(),
                ui_prompts: vec![kind.base_artifact().to_string()],
                error: None,
            }),
        ),
        // the model picked neither template, so the request is the problem
        Err(e @ Error::Template(_)) => {
            log::warn!("unclassifiable prompt: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(TemplateResponse {
                    template: None,
                    prompts: Vec::new(),
                    ui_prompts: Vec::new(),
                    error: Some(e.to_string()),
                }),
            )
        }
        Err(e) => {
            log::warn!("template classification failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TemplateResponse {
                    template: None,
                    prompts: Vec::new(),
                    ui_prompts: Vec::new(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    match state.ai.generate_plan(&req.messages).await {
        Ok(response) => {
            let steps: Vec<StepSummary> = parse_artifact(&response, 1)
                .iter()
                .map(StepSummary::from)
                .collect();
            (
                StatusCode::OK,
                Json(ChatResponse {
                    response,
                    steps,
                    error: None,
                }),
            )
        }
        Err(e) => {
            log::warn!("plan generation failed: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(ChatResponse {
                    response: String::new(),
                    steps: Vec::new(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
