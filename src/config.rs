use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub address: SocketAddr,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source, falling back to
    /// defaults for everything except `DATABASE_URL`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let host = match lookup("HOST") {
            Some(host) => host
                .parse::<IpAddr>()
                .with_context(|| format!("HOST `{host}` is not a valid IP address"))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT `{port}` is not a valid port"))?,
            None => DEFAULT_PORT,
        };
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(max) => max
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS `{max}` is not a number"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            database_url,
            address: SocketAddr::new(host, port),
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_database_is_set() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite://news.db")]))
            .unwrap();
        assert_eq!(config.database_url, "sqlite://news.db");
        assert_eq!(config.address, SocketAddr::from(([127, 0, 0, 1], 3001)));
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9090"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();
        assert_eq!(config.address, SocketAddr::from(([0, 0, 0, 0], 9090)));
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let error = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(error.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://news.db"),
            ("PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }
}
