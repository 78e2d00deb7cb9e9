//! Runtime configuration resolved from environment variables

use std::env;
use std::path::{Path, PathBuf};

/// Default number of chunks requested from the semantic index
pub const DEFAULT_TOP_N: usize = 20;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 3030;

/// How the binary exposes the search pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeMode {
    /// MCP JSON-RPC over stdin/stdout
    Stdio,
    /// REST API over HTTP
    Http,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Format named by `PRODUCT_SEARCH_LOG_FORMAT`, read before logging starts
    pub fn from_env() -> Self {
        Self::parse(env::var("PRODUCT_SEARCH_LOG_FORMAT").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub catalog_path: PathBuf,
    pub thesaurus_path: Option<PathBuf>,
    pub mode: ServeMode,
    pub port: u16,
    pub top_n: usize,
    pub log_format: LogFormat,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            catalog_path: current_dir.join("products.jsonl"),
            thesaurus_path: None,
            mode: ServeMode::Stdio,
            port: DEFAULT_PORT,
            top_n: DEFAULT_TOP_N,
            log_format: LogFormat::Text,
        }
    }
}

impl SearchConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Invalid values are reported as warnings and replaced by defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        if let Some(path) = lookup("PRODUCT_CATALOG_PATH") {
            config.catalog_path = resolve_path(&current_dir, &path);
        }

        if let Some(path) = lookup("PRODUCT_THESAURUS_PATH") {
            if !path.trim().is_empty() {
                config.thesaurus_path = Some(resolve_path(&current_dir, &path));
            }
        }

        if let Some(mode) = lookup("PRODUCT_SEARCH_MODE") {
            match mode.to_lowercase().as_str() {
                "stdio" => config.mode = ServeMode::Stdio,
                "http" => config.mode = ServeMode::Http,
                other => tracing::warn!("Unknown PRODUCT_SEARCH_MODE '{}', using stdio", other),
            }
        }

        if let Some(port) = lookup("PRODUCT_SEARCH_PORT") {
            match port.parse::<u16>() {
                Ok(p) => config.port = p,
                Err(_) => tracing::warn!(
                    "Invalid PRODUCT_SEARCH_PORT '{}', using {}",
                    port,
                    DEFAULT_PORT
                ),
            }
        }

        if let Some(top_n) = lookup("PRODUCT_SEARCH_TOP_N") {
            match top_n.parse::<usize>() {
                Ok(n) if n > 0 => config.top_n = n,
                _ => tracing::warn!(
                    "Invalid PRODUCT_SEARCH_TOP_N '{}', using {}",
                    top_n,
                    DEFAULT_TOP_N
                ),
            }
        }

        config.log_format = LogFormat::parse(lookup("PRODUCT_SEARCH_LOG_FORMAT").as_deref());

        config
    }
}

fn resolve_path(base: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SearchConfig::from_lookup(|_| None);
        assert_eq!(config.mode, ServeMode::Stdio);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert!(config.thesaurus_path.is_none());
        assert!(config.catalog_path.ends_with("products.jsonl"));
    }

    #[test]
    fn test_overrides() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            ("PRODUCT_CATALOG_PATH", "/data/catalog.jsonl"),
            ("PRODUCT_THESAURUS_PATH", "colors.txt"),
            ("PRODUCT_SEARCH_MODE", "HTTP"),
            ("PRODUCT_SEARCH_PORT", "8080"),
            ("PRODUCT_SEARCH_TOP_N", "5"),
            ("PRODUCT_SEARCH_LOG_FORMAT", "json"),
        ]));
        assert_eq!(config.catalog_path, PathBuf::from("/data/catalog.jsonl"));
        assert!(config.thesaurus_path.unwrap().ends_with("colors.txt"));
        assert_eq!(config.mode, ServeMode::Http);
        assert_eq!(config.port, 8080);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            ("PRODUCT_SEARCH_MODE", "grpc"),
            ("PRODUCT_SEARCH_PORT", "not-a-port"),
            ("PRODUCT_SEARCH_TOP_N", "0"),
        ]));
        assert_eq!(config.mode, ServeMode::Stdio);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
    }
}
