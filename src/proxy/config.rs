use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Upstream Veo API base, every relay route appends its method suffix to it
pub const VEO_API_BASE: &str = "https://aisandbox-pa.googleapis.com/v1";

/// Environment variable naming an optional JSON config file
pub const CONFIG_PATH_ENV: &str = "VEO_PROXY_CONFIG";

/// Relay service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to accept connections from other hosts
    /// - true: bind 0.0.0.0 (default, the browser client usually runs elsewhere)
    /// - false: bind 127.0.0.1 only
    #[serde(default = "default_allow_lan_access")]
    pub allow_lan_access: bool,

    /// Maximum accepted JSON body (MiB); uploads carry images inline
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// Outbound proxy for upstream calls
    #[serde(default)]
    pub upstream_proxy: UpstreamProxyConfig,

    /// Upstream base URL. Fixed in production, replaced in tests.
    #[serde(skip, default = "default_upstream_base")]
    pub upstream_base: String,
}

/// Outbound proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpstreamProxyConfig {
    /// Whether enabled
    pub enabled: bool,
    /// Proxy address (http://, https://, socks5://)
    pub url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allow_lan_access: default_allow_lan_access(),
            body_limit_mb: default_body_limit_mb(),
            upstream_proxy: UpstreamProxyConfig::default(),
            upstream_base: default_upstream_base(),
        }
    }
}

fn default_port() -> u16 {
    3001
}

fn default_allow_lan_access() -> bool {
    true
}

fn default_body_limit_mb() -> usize {
    50
}

fn default_upstream_base() -> String {
    VEO_API_BASE.to_string()
}

impl ProxyConfig {
    /// Get the actual listening address
    pub fn get_bind_address(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb * 1024 * 1024
    }

    /// Load config: optional JSON file from `VEO_PROXY_CONFIG`, then env overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply environment overrides through `lookup` so tests never touch the process env
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            self.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: "PORT",
                    value,
                })?;
        }

        if let Some(value) = lookup("VEO_PROXY_ALLOW_LAN").filter(|v| !v.trim().is_empty()) {
            self.allow_lan_access = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: "VEO_PROXY_ALLOW_LAN",
                        value,
                    })
                }
            };
        }

        if let Some(url) = lookup("UPSTREAM_PROXY_URL").filter(|v| !v.trim().is_empty()) {
            self.upstream_proxy = UpstreamProxyConfig {
                enabled: true,
                url: url.trim().to_string(),
            };
        }

        Ok(())
    }
}
