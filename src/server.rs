//! HTTP surface: the JSON endpoint, the web UI and transcript downloads

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use eyre::{Result, WrapErr};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::signal;

use crate::output::{DOWNLOAD_CONTENT_TYPE, attachment_disposition};
use crate::pipeline::{Outcome, transcribe_url};
use crate::source::SegmentSource;
use crate::ui;

/// Per-request context handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn SegmentSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn SegmentSource>) -> Self {
        Self { source }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UrlQuery {
    pub url: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get-transcript", post(get_video_transcript))
        .route("/download", get(download))
        .with_state(state)
}

/// Serve until Ctrl+C
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("binding to {addr}"))?;
    info!("Transcript service listening on http://{addr}");
    eprintln!("Listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("running HTTP server")?;

    info!("Transcript service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {err}");
    }
}

async fn get_video_transcript(State(state): State<AppState>, Json(req): Json<TranscriptRequest>) -> Response {
    info!("POST /get-transcript url={}", req.url);
    match transcribe_url(state.source.as_ref(), &req.url).await {
        Outcome::Success(transcript) => Json(TranscriptResponse {
            transcript: transcript.text,
        })
        .into_response(),
        failed => bad_request_json(failed.error_detail().unwrap_or_default()),
    }
}

async fn index(State(state): State<AppState>, Query(query): Query<UrlQuery>) -> Html<String> {
    let url = query.url.as_deref().filter(|u| !u.is_empty());
    let outcome = match url {
        Some(url) => Some(transcribe_url(state.source.as_ref(), url).await),
        None => None,
    };
    Html(ui::render_page(url, outcome.as_ref()))
}

async fn download(State(state): State<AppState>, Query(query): Query<UrlQuery>) -> Response {
    let url = query.url.unwrap_or_default();
    match transcribe_url(state.source.as_ref(), &url).await {
        Outcome::Success(transcript) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, DOWNLOAD_CONTENT_TYPE.to_string()),
                (header::CONTENT_DISPOSITION, attachment_disposition()),
            ],
            transcript.text,
        )
            .into_response(),
        failed => (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, DOWNLOAD_CONTENT_TYPE.to_string())],
            failed.error_detail().unwrap_or_default(),
        )
            .into_response(),
    }
}

fn bad_request_json(detail: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { detail })).into_response()
}
