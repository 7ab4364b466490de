use std::{env, net::{SocketAddr, ToSocketAddrs as _}};

use sea_orm::ConnectOptions;
use thiserror::Error;
use tracing::info;

pub struct Config {
    pub host_address: SocketAddr,

    pub database_opt: ConnectOptions,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment `{0}` is required to be set")]
    Missing(&'static str),

    #[error("environment `{name}` is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

pub fn load() -> Result<Config, ConfigError> {
    Ok(Config {
        host_address: load_host_address()?,
        database_opt: load_database_opt()?,
    })
}

fn load_host_address() -> Result<SocketAddr, ConfigError> {
    info!("Loading environment `HOST_ADDRESS`");

    let var = env::var("HOST_ADDRESS").unwrap_or_else(|_| "127.0.0.1:0".to_string());

    parse_host_address(&var)
}

fn parse_host_address(value: &str) -> Result<SocketAddr, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid { name: "HOST_ADDRESS", reason };

    value.to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid(format!("unable to resolve host from `{value}`")))
}

fn load_database_opt() -> Result<ConnectOptions, ConfigError> {
    info!("Loading environment `DATABASE_URL`");

    let var = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

    let mut opt = ConnectOptions::new(var);
    if let Ok(max) = env::var("DATABASE_MAX_CONNECTIONS") {
        info!("Loading environment `DATABASE_MAX_CONNECTIONS`");

        opt.max_connections(parse_max_connections(&max)?);
    }

    Ok(opt)
}

fn parse_max_connections(value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(max) if max > 0 => Ok(max),
        _ => Err(ConfigError::Invalid {
            name: "DATABASE_MAX_CONNECTIONS",
            reason: format!("`{value}` is not a positive integer"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_address() {
        let address = parse_host_address("127.0.0.1:8080").unwrap();
        assert_eq!(address.port(), 8080);

        assert!(matches!(parse_host_address("not an address"), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_parse_max_connections() {
        assert_eq!(parse_max_connections(" 16 ").unwrap(), 16);
        assert!(parse_max_connections("0").is_err());
        assert!(parse_max_connections("many").is_err());
    }
}
