//! Route handlers.
//!
//! All three entry points share one [`TextPipeline`](crate::pipeline::TextPipeline)
//! and differ only in how they read the URL and present the outcome.

use axum::{
    Form, Json,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::error_response::ErrorBody;
use super::page::IndexView;
use super::state::AppState;
use crate::error::{EMPTY_DOWNLOAD_URL_MESSAGE, Error, MISSING_URL_MESSAGE};

/// File name offered for the cleaned-text download
pub const DOWNLOAD_FILE_NAME: &str = "aozora_cleaned.txt";

/// Body of `POST /api/convert`, as JSON or form fields
#[derive(Debug, Default, Deserialize)]
pub struct UrlPayload {
    #[serde(default)]
    pub url: Option<String>,
}

/// Fields submitted by the form page
#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub url: Option<String>,
    /// `convert` (default) or `clear`
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextBody {
    pub text: String,
}

/// POST /api/convert
pub async fn convert(State(state): State<AppState>, request: Request) -> Response {
    let url = requested_url(request).await;
    if url.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(MISSING_URL_MESSAGE)),
        )
            .into_response();
    }

    match state.pipeline.fetch_clean_text(&url).await {
        Ok(text) => Json(TextBody { text }).into_response(),
        Err(e) => {
            log_failure(&url, &e);
            e.into_response()
        }
    }
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Response {
    render_page(&state, StatusCode::OK, &IndexView::default())
}

/// POST /
pub async fn submit(State(state): State<AppState>, Form(form): Form<PageForm>) -> Response {
    if form.action.as_deref() == Some("clear") {
        return render_page(&state, StatusCode::OK, &IndexView::default());
    }

    let url = form.url.as_deref().unwrap_or_default().trim();
    if url.is_empty() {
        let view = IndexView {
            error: Some(MISSING_URL_MESSAGE),
            ..Default::default()
        };
        return render_page(&state, StatusCode::OK, &view);
    }

    match state.pipeline.fetch_clean_text(url).await {
        Ok(text) => {
            let view = IndexView {
                url,
                text: Some(&text),
                error: None,
            };
            render_page(&state, StatusCode::OK, &view)
        }
        Err(e) => {
            log_failure(url, &e);
            let message = e.user_message();
            let view = IndexView {
                url,
                text: None,
                error: Some(&message),
            };
            render_page(&state, StatusCode::OK, &view)
        }
    }
}

/// POST /download
pub async fn download(State(state): State<AppState>, Form(form): Form<PageForm>) -> Response {
    let url = form.url.as_deref().unwrap_or_default().trim();
    if url.is_empty() {
        let view = IndexView {
            error: Some(EMPTY_DOWNLOAD_URL_MESSAGE),
            ..Default::default()
        };
        return render_page(&state, StatusCode::BAD_REQUEST, &view);
    }

    match state.pipeline.fetch_clean_text(url).await {
        Ok(text) => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
                ),
            ],
            text,
        )
            .into_response(),
        Err(e) => {
            log_failure(url, &e);
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let message = e.user_message();
            let view = IndexView {
                url,
                text: None,
                error: Some(&message),
            };
            render_page(&state, status, &view)
        }
    }
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Read `url` from a form-encoded or JSON body. Anything unreadable counts
/// as no URL.
async fn requested_url(request: Request) -> String {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

    let payload = if is_form {
        Form::<UrlPayload>::from_request(request, &())
            .await
            .map(|Form(payload)| payload)
            .unwrap_or_default()
    } else {
        match Bytes::from_request(request, &()).await {
            Ok(body) => serde_json::from_slice(&body).unwrap_or_default(),
            Err(_) => UrlPayload::default(),
        }
    };

    payload.url.unwrap_or_default().trim().to_string()
}

fn render_page(state: &AppState, status: StatusCode, view: &IndexView<'_>) -> Response {
    match state.pages.render_index(view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

fn log_failure(url: &str, e: &Error) {
    if e.is_classified() {
        warn!(%url, error = ?e, "conversion failed");
    } else {
        error!(%url, error = ?e, "unexpected failure during conversion");
    }
}
