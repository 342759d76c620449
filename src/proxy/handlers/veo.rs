// Veo JSON relay handlers
use axum::{
    extract::{FromRequest, Json, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{ProxyError, ProxyResult};
use crate::proxy::common::summary::{redact, summarize_request, summarize_response};
use crate::proxy::common::utils::token_fingerprint;
use crate::proxy::middleware::BearerToken;
use crate::proxy::server::AppState;
use crate::proxy::upstream::client::{UpstreamReply, VeoEndpoint};

/// `Json` whose rejections render as `{"error": ...}` like every other local failure
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ProxyError))]
pub struct RelayJson<T>(pub T);

impl IntoResponse for UpstreamReply {
    // Status and bytes exactly as the upstream sent them
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

/// Forward one JSON call and relay whatever the upstream answered
async fn relay(
    state: &AppState,
    endpoint: VeoEndpoint,
    token: &BearerToken,
    body: &Value,
) -> ProxyResult<UpstreamReply> {
    let label = endpoint.label();

    info!(
        route = label,
        token = %token_fingerprint(token.as_str()),
        request = %summarize_request(endpoint, body),
        "Forwarding to Veo API"
    );
    debug!(route = label, payload = %redact(body), "Outbound payload");

    let reply = state
        .upstream
        .forward(endpoint, token.as_str(), body)
        .await
        .map_err(|e| {
            error!(route = label, "Proxy error: {}", e);
            e
        })?;

    if reply.status.is_success() {
        info!(
            route = label,
            status = reply.status.as_u16(),
            response = %summarize_response(endpoint, &reply.json),
            "Veo API success"
        );
    } else {
        warn!(
            route = label,
            status = reply.status.as_u16(),
            response = %redact(&reply.json),
            "Veo API error, relaying unchanged"
        );
    }
    debug!(route = label, payload = %redact(&reply.json), "Upstream payload");

    Ok(reply)
}

/// POST /api/veo/generate-t2v
pub async fn handle_generate_t2v(
    State(state): State<AppState>,
    token: BearerToken,
    RelayJson(body): RelayJson<Value>,
) -> ProxyResult<UpstreamReply> {
    relay(&state, VeoEndpoint::GenerateText, &token, &body).await
}

/// POST /api/veo/generate-i2v
pub async fn handle_generate_i2v(
    State(state): State<AppState>,
    token: BearerToken,
    RelayJson(body): RelayJson<Value>,
) -> ProxyResult<UpstreamReply> {
    relay(&state, VeoEndpoint::GenerateImage, &token, &body).await
}

/// POST /api/veo/status
pub async fn handle_status(
    State(state): State<AppState>,
    token: BearerToken,
    RelayJson(body): RelayJson<Value>,
) -> ProxyResult<UpstreamReply> {
    relay(&state, VeoEndpoint::CheckStatus, &token, &body).await
}

/// POST /api/veo/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    token: BearerToken,
    RelayJson(body): RelayJson<Value>,
) -> ProxyResult<UpstreamReply> {
    relay(&state, VeoEndpoint::UploadImage, &token, &body).await
}
