//! HTTP routes for the report form

use super::page::{render_form, Flash};
use crate::core::export::XLSX_CONTENT_TYPE;
use crate::core::report::ReportCoordinator;
use crate::domain::ReportError;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Shared state of the form server
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<ReportCoordinator>,
}

/// Submitted date range; missing fields arrive as empty strings and fail
/// validation like any other bad date
#[derive(Debug, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Builds the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form_page).post(generate_report))
        .route("/health", get(healthcheck))
        .with_state(state)
}

pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn form_page(Query(flash): Query<Flash>) -> Html<String> {
    Html(render_form(&flash))
}

async fn generate_report(
    State(state): State<AppState>,
    Form(form): Form<ReportForm>,
) -> Response {
    match state
        .coordinator
        .run(&form.start_date, &form.end_date)
        .await
    {
        Ok(outcome) => {
            let disposition = format!("attachment; filename=\"{}\"", outcome.file_name);
            let disposition = HeaderValue::from_str(&disposition)
                .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                outcome.bytes,
            )
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}

impl IntoResponse for ReportError {
    /// Every failure goes back to the form as a flash message
    fn into_response(self) -> Response {
        let flash = Flash::new(self.severity().as_str(), self.user_message());
        Redirect::to(&format!("/?{}", flash.to_query())).into_response()
    }
}
