use reqwest::{Client, Proxy};

use crate::proxy::config::UpstreamProxyConfig;

/// Create an HTTP client with the specified outbound proxy configuration.
///
/// No request timeout is set: a slow upstream holds the inbound connection
/// open until the transport gives up. System proxy variables are ignored;
/// only an explicitly enabled proxy is used.
pub fn create_client_with_proxy(proxy_config: Option<&UpstreamProxyConfig>) -> Client {
    let mut builder = Client::builder().no_proxy();

    if let Some(config) = proxy_config {
        if config.enabled && !config.url.is_empty() {
            match Proxy::all(&config.url) {
                Ok(proxy) => {
                    builder = builder.proxy(proxy);
                    tracing::info!("HTTP client upstream proxy enabled: {}", config.url);
                }
                Err(e) => {
                    tracing::error!("Invalid proxy address: {}, error: {}", config.url, e);
                }
            }
        }
    }

    builder.build().unwrap_or_else(|_| Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_proxy_falls_back_to_direct_client() {
        let config = UpstreamProxyConfig {
            enabled: true,
            url: "::not a proxy::".to_string(),
        };
        // Must not panic; the bad proxy is logged and skipped
        let _client = create_client_with_proxy(Some(&config));
    }
}
