//! HTTP surface: the triage page, the JSON API, and a health probe.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::json;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use triage_core::{FormInput, TriageError};
use triage_model::{TriagePipeline, TriageReport};

use crate::form::FormFields;
use crate::page::{FieldErrors, Pages};

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TriagePipeline>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(pipeline: TriagePipeline) -> Result<Self, minijinja::Error> {
        Ok(Self {
            pipeline: Arc::new(pipeline),
            pages: Arc::new(Pages::new()?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/predict", post(predict))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Triage(#[from] TriageError),

    /// JSON body that is malformed or does not match `FormInput`.
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error("render page: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Triage(e) if e.is_user_correctable() => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Body(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Triage(e) => e.code(),
            Self::Body(_) => "invalid_input",
            Self::Render(_) => "render",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "request failed");
        }

        let field = match &self {
            Self::Triage(e) => e.field(),
            Self::Body(_) | Self::Render(_) => None,
        };
        let body = json!({
            "error": {
                "code": self.code(),
                "field": field,
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = state.pages.index(
        state.pipeline.schema(),
        &FormFields::initial(),
        &FieldErrors::default(),
        None,
    )?;
    Ok(Html(html))
}

/// Page form post. Input errors re-render the form with inline messages
/// and a 422; anything else is a server error.
async fn submit(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Response, AppError> {
    let outcome = fields.parse().and_then(|input| state.pipeline.run(&input));

    match outcome {
        Ok(report) => {
            log_report(&report);
            let html = state.pages.index(
                state.pipeline.schema(),
                &fields,
                &FieldErrors::default(),
                Some(&report),
            )?;
            Ok(Html(html).into_response())
        }
        Err(err) if err.is_user_correctable() => {
            let html = state.pages.index(
                state.pipeline.schema(),
                &fields,
                &FieldErrors::from_error(&err),
                None,
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

async fn predict(
    State(state): State<AppState>,
    body: Result<Json<FormInput>, JsonRejection>,
) -> Result<Json<TriageReport>, AppError> {
    let Json(input) = body?;
    let report = state.pipeline.run(&input)?;
    log_report(&report);
    Ok(Json(report))
}

fn log_report(report: &TriageReport) {
    info!(
        category = report.result.category.label(),
        risk = %report.result.risk,
        confidence = report.result.confidence,
        "triage completed"
    );
}
