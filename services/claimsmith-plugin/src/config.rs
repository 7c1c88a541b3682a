use std::env;
use std::net::SocketAddr;

use anyhow::Context;

pub const LISTEN_ADDR_VAR: &str = "CLAIMSMITH_LISTEN_ADDR";
pub const LOG_FORMAT_VAR: &str = "CLAIMSMITH_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(
            env::var(LISTEN_ADDR_VAR).ok().as_deref(),
            env::var(LOG_FORMAT_VAR).ok().as_deref(),
        )
    }

    fn from_vars(listen_addr: Option<&str>, log_format: Option<&str>) -> anyhow::Result<Self> {
        let listen_addr = listen_addr
            .unwrap_or("127.0.0.1:0")
            .parse()
            .with_context(|| format!("{} is not a socket address", LISTEN_ADDR_VAR))?;

        let log_format = match log_format.unwrap_or("text") {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => anyhow::bail!("{} must be \"text\" or \"json\", got {:?}", LOG_FORMAT_VAR, other),
        };

        Ok(Config {
            listen_addr,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:0".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_vars(Some("0.0.0.0:7443"), Some("json")).unwrap();
        assert_eq!(config.listen_addr.port(), 7443);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_vars(Some("not-an-addr"), None).is_err());
        assert!(Config::from_vars(None, Some("xml")).is_err());
    }
}
