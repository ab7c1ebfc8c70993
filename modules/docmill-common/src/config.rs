use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration for the crawl service (default port 8001).
    pub fn crawl_from_env() -> Self {
        Self::from_env_with_default_port(8001)
    }

    /// Load configuration for the preprocess service (default port 8002).
    pub fn preprocess_from_env() -> Self {
        Self::from_env_with_default_port(8002)
    }

    /// Load configuration for the retrieval service (default port 8003).
    pub fn rag_from_env() -> Self {
        Self::from_env_with_default_port(8003)
    }

    fn from_env_with_default_port(default_port: u16) -> Self {
        Self::resolve(
            env::var("DOCMILL_HOST").ok(),
            env::var("DOCMILL_PORT").ok(),
            default_port,
        )
    }

    /// Build a config from optional host/port overrides, falling back to
    /// `0.0.0.0` and the service's default port.
    fn resolve(host: Option<String>, port: Option<String>, default_port: u16) -> Self {
        Self {
            host: host.unwrap_or_else(|| "0.0.0.0".to_string()),
            port: port
                .map(|p| p.parse().expect("DOCMILL_PORT must be a number"))
                .unwrap_or(default_port),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_overrides() {
        let config = Config::resolve(None, None, 8001);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8001);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let config = Config::resolve(Some("127.0.0.1".to_string()), Some("9000".to_string()), 8001);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn each_service_gets_its_own_default_port() {
        assert_eq!(Config::resolve(None, None, 8001).port, 8001);
        assert_eq!(Config::resolve(None, None, 8002).port, 8002);
        assert_eq!(Config::resolve(None, None, 8003).port, 8003);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }
}
