//! Gateway configuration: CLI flags with environment fallbacks

use crate::auth::jwt::MAX_TOKEN_TTL_SECS;
use crate::auth::password::DEFAULT_BCRYPT_COST;
use crate::feed::DEFAULT_FEED_URL;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEV_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

/// Minimal authentication gateway
#[derive(Parser, Debug, Clone)]
#[command(name = "authgate")]
#[command(about = "Register users, issue and revoke session tokens, proxy the public API feed")]
pub struct GatewayConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 9000)]
    pub port: u16,

    /// HMAC secret used to sign session tokens
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// bcrypt work factor
    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_BCRYPT_COST)]
    pub bcrypt_cost: u32,

    /// Token lifetime in seconds (tokens never expire when unset)
    #[arg(
        long,
        env = "TOKEN_TTL_SECS",
        value_parser = clap::value_parser!(u64).range(1..=MAX_TOKEN_TTL_SECS)
    )]
    pub token_ttl_secs: Option<u64>,

    /// Upstream public API catalogue
    #[arg(long, env = "PUBLIC_API_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "PUBLIC_API_TIMEOUT_SECS", default_value_t = 10)]
    pub feed_timeout_secs: u64,
}

impl GatewayConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", addr, e))
    }

    /// Configured secret, or the development fallback
    pub fn secret(&self) -> (&str, bool) {
        match self.secret_key.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => (secret, false),
            None => (DEV_SECRET, true),
        }
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::try_parse_from(["authgate"]).unwrap();
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.feed_timeout(), Duration::from_secs(10));
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
    }

    #[test]
    fn test_explicit_flags() {
        let config = GatewayConfig::try_parse_from([
            "authgate",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--secret-key",
            "s3cret",
            "--token-ttl-secs",
            "3600",
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.secret(), ("s3cret", false));
        assert_eq!(config.token_ttl_secs, Some(3600));
    }

    #[test]
    fn test_token_ttl_bounds() {
        assert!(GatewayConfig::try_parse_from(["authgate", "--token-ttl-secs", "0"]).is_err());
        assert!(GatewayConfig::try_parse_from([
            "authgate",
            "--token-ttl-secs",
            "18446744073709551615",
        ])
        .is_err());
    }

    #[test]
    fn test_empty_secret_falls_back() {
        let config = GatewayConfig::try_parse_from(["authgate", "--secret-key", ""]).unwrap();
        assert_eq!(config.secret(), (DEV_SECRET, true));
    }
}
