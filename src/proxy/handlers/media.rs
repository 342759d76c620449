// Media download handler (lets the browser fetch upstream storage it cannot reach cross-origin)
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use serde::Deserialize;
use tracing::{error, info};

use crate::error::{ProxyError, ProxyResult};
use crate::proxy::middleware::media_cors_headers;
use crate::proxy::server::AppState;

const MEDIA_CONTENT_TYPE: &str = "video/mp4";
const FILENAME_PREFIX: &str = "monoklix-video";

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub url: Option<String>,
}

fn download_filename() -> String {
    format!("{}-{}.mp4", FILENAME_PREFIX, chrono::Utc::now().timestamp_millis())
}

fn describe_size(content_length: Option<u64>) -> String {
    match content_length {
        Some(len) => format!("{:.2} MB", len as f64 / 1024.0 / 1024.0),
        None => "unknown".to_string(),
    }
}

fn media_headers(content_length: Option<u64>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(MEDIA_CONTENT_TYPE),
    );
    if let Some(len) = content_length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }
    let disposition = format!("inline; filename=\"{}\"", download_filename());
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).unwrap_or(HeaderValue::from_static("inline")),
    );
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000"),
    );
    headers.extend(media_cors_headers());
    headers
}

/// GET /api/veo/download-video?url=...
pub async fn handle_download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> ProxyResult<Response> {
    let media_url = match query.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => {
            error!("No URL provided");
            return Err(ProxyError::MissingUrl);
        }
    };

    // Host only: signed query parameters stay out of the logs
    let host = url::Url::parse(&media_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();
    info!(host = %host, "Fetching media");

    let response = state.upstream.fetch_media(&media_url).await.map_err(|e| {
        error!("Proxy error (DOWNLOAD): {}", e);
        e
    })?;

    let status = response.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        error!(status = status.as_u16(), "Failed to fetch media: {}", reason);
        return Err(ProxyError::DownloadFailed { status, reason });
    }

    let content_length = response.content_length();
    let upstream_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    info!(
        size = %describe_size(content_length),
        content_type = %upstream_type,
        "Streaming media to client"
    );

    let stream = response.bytes_stream().map(|chunk| {
        chunk.map_err(|e| {
            let e = e.without_url();
            error!("Media stream interrupted: {}", e);
            e
        })
    });

    let headers = media_headers(content_length);
    Ok((StatusCode::OK, headers, Body::from_stream(stream)).into_response())
}

/// OPTIONS /api/veo/download-video
pub async fn handle_download_preflight() -> impl IntoResponse {
    (StatusCode::OK, media_cors_headers())
}
