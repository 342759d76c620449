// Bearer token extraction
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::error::ProxyError;

/// Caller's upstream credential, forwarded untouched and never logged
#[derive(Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Take the token from `Authorization`, dropping the first `Bearer ` marker.
/// A header without the marker is used as the token itself.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let token = raw.replacen("Bearer ", "", 1);
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match extract_bearer(&parts.headers) {
            Some(token) => Ok(BearerToken(token)),
            None => {
                tracing::warn!("No auth token provided");
                Err(ProxyError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(auth: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(value) = auth {
            map.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_bearer_prefix_is_stripped() {
        assert_eq!(
            extract_bearer(&headers(Some("Bearer ya29.a0Af"))),
            Some("ya29.a0Af".to_string())
        );
    }

    #[test]
    fn test_missing_or_empty_token() {
        assert_eq!(extract_bearer(&headers(None)), None);
        assert_eq!(extract_bearer(&headers(Some("Bearer "))), None);
    }

    #[test]
    fn test_raw_token_without_scheme() {
        assert_eq!(
            extract_bearer(&headers(Some("ya29.raw"))),
            Some("ya29.raw".to_string())
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let token = BearerToken("secret".to_string());
        assert!(!format!("{:?}", token).contains("secret"));
    }
}
