use std::{env, path::PathBuf};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 16 * 1024;

/// Startup configuration for the API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// SQLite file; `None` keeps scores in memory
    pub database_path: Option<PathBuf>,
    pub json_limit: usize,
    pub http_workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_path: None,
            json_limit: DEFAULT_JSON_LIMIT_BYTES,
            http_workers: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut bind_addr = read_string(&lookup, "API_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        if let Some(port) = read_optional_u16(&lookup, "PORT") {
            bind_addr = with_port(&bind_addr, port);
        }

        Self {
            bind_addr,
            database_path: read_string(&lookup, "DATABASE_PATH").map(PathBuf::from),
            json_limit: read_usize(&lookup, "JSON_LIMIT_BYTES", DEFAULT_JSON_LIMIT_BYTES),
            http_workers: read_optional_usize(&lookup, "HTTP_WORKERS"),
        }
    }
}

fn with_port(addr: &str, port: u16) -> String {
    let host = match addr.rsplit_once(':') {
        Some((host, _)) => host,
        None => addr,
    };
    format!("{host}:{port}")
}

fn read_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_usize(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: usize) -> usize {
    read_optional_usize(lookup, name).unwrap_or(default)
}

fn read_optional_usize(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<usize> {
    lookup(name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
}

fn read_optional_u16(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u16> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Some(port),
        _ => {
            log::warn!("ignoring {name}={raw:?}: not a valid port");
            None
        }
    }
}
