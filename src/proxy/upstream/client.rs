// Upstream client implementation
// One shared reqwest client, one outbound call per inbound request

use bytes::Bytes;
use reqwest::{header, Client, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{ProxyError, ProxyResult};
use crate::proxy::config::ProxyConfig;

// The upstream only accepts calls that look like they come from its own web client
const UPSTREAM_ORIGIN: &str = "https://labs.google";
const UPSTREAM_REFERER: &str = "https://labs.google/";

/// Upstream methods reachable through the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VeoEndpoint {
    GenerateText,
    GenerateImage,
    CheckStatus,
    UploadImage,
}

impl VeoEndpoint {
    /// Suffix appended to the upstream base URL
    pub fn suffix(self) -> &'static str {
        match self {
            VeoEndpoint::GenerateText => "/video:batchAsyncGenerateVideoText",
            VeoEndpoint::GenerateImage => "/video:batchAsyncGenerateVideoStartImage",
            VeoEndpoint::CheckStatus => "/video:batchCheckAsyncVideoGenerationStatus",
            VeoEndpoint::UploadImage => ":uploadUserImage",
        }
    }

    /// Short label used in log lines
    pub fn label(self) -> &'static str {
        match self {
            VeoEndpoint::GenerateText => "T2V",
            VeoEndpoint::GenerateImage => "I2V",
            VeoEndpoint::CheckStatus => "STATUS",
            VeoEndpoint::UploadImage => "UPLOAD",
        }
    }
}

/// Upstream answer to a JSON call, kept byte-exact for pass-through
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
    pub json: Value,
}

pub struct UpstreamClient {
    http_client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: &ProxyConfig) -> Self {
        let http_client =
            crate::utils::http::create_client_with_proxy(Some(&config.upstream_proxy));

        Self {
            http_client,
            base_url: config.upstream_base.trim_end_matches('/').to_string(),
        }
    }

    /// Build upstream URL for an endpoint
    fn build_url(&self, endpoint: VeoEndpoint) -> String {
        format!("{}{}", self.base_url, endpoint.suffix())
    }

    /// POST `body` verbatim to `endpoint`, authorized with the caller's token.
    ///
    /// Non-2xx upstream answers are returned as a normal reply; only transport
    /// failures and non-JSON bodies are errors.
    pub async fn forward(
        &self,
        endpoint: VeoEndpoint,
        access_token: &str,
        body: &Value,
    ) -> ProxyResult<UpstreamReply> {
        let url = self.build_url(endpoint);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", access_token))
                .map_err(|_| ProxyError::Unauthorized)?,
        );
        headers.insert(header::ORIGIN, header::HeaderValue::from_static(UPSTREAM_ORIGIN));
        headers.insert(
            header::REFERER,
            header::HeaderValue::from_static(UPSTREAM_REFERER),
        );

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let json = serde_json::from_slice(&body).map_err(|e| {
            ProxyError::InvalidUpstreamBody(format!(
                "Invalid JSON from upstream (HTTP {}): {}",
                status.as_u16(),
                e
            ))
        })?;

        Ok(UpstreamReply { status, body, json })
    }

    /// Plain GET of a media URL; the response is returned unread for streaming.
    ///
    /// Transport errors drop the URL: media URLs carry signed query credentials.
    pub async fn fetch_media(&self, media_url: &str) -> ProxyResult<Response> {
        let url = parse_media_url(media_url)?;
        self.http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.without_url()))
    }
}

fn parse_media_url(media_url: &str) -> ProxyResult<Url> {
    let url = Url::parse(media_url).map_err(|e| ProxyError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ProxyError::InvalidUrl(format!(
            "Unsupported URL scheme: {}",
            other
        ))),
    }
}
