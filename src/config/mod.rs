//! Configuration module.
//!
//! Settings are immutable once the server has started. Sources, in order of
//! precedence: built-in defaults, an optional `previewd.toml` in the working
//! directory, `PREVIEWD_`-prefixed environment variables, and finally the CLI
//! listen-prefix argument applied by `main`.

mod state;

use std::collections::HashMap;
use std::net::{SocketAddr, ToSocketAddrs};

use serde::Deserialize;

use crate::error::Error;

pub use state::ServeState;

/// Listen prefix used when neither configuration nor CLI provide one.
pub const DEFAULT_PREFIX: &str = "http://localhost:5000/";

/// Main configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub serve: ServeConfig,
    pub logging: LoggingConfig,
    /// Extra MIME entries, keyed by lowercase extension without the dot.
    /// Merged over the built-in table; on conflict the configured entry wins.
    #[serde(default)]
    pub mime: HashMap<String, String>,
}

/// Listener configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Listen URL prefix, e.g. `http://localhost:5000/`.
    pub prefix: String,
}

/// File resolution configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServeConfig {
    /// Primary root directory. Defaults to the current working directory.
    #[serde(default)]
    pub root: Option<String>,
    /// Consult the parent of the primary root when a lookup misses.
    pub fallback_parent: bool,
    /// Document substituted for an empty or `/` request path.
    pub default_document: String,
    /// Reject resolved paths that escape the root they were joined to.
    ///
    /// The original tool performed an unchecked join; disabling this restores
    /// that behavior for trusted local use.
    pub strict_paths: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    /// Load configuration from `previewd.toml` in the working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("previewd")
    }

    /// Load configuration from the specified file path (without extension).
    /// The file is optional; defaults and environment apply either way.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("PREVIEWD"))
            .set_default("server.prefix", DEFAULT_PREFIX)?
            .set_default("serve.fallback_parent", true)?
            .set_default("serve.default_document", "index.html")?
            .set_default("serve.strict_paths", true)?
            .set_default("logging.access_log", true)?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        // Prefixes from file or environment get the same normalization as
        // the CLI argument.
        cfg.server.prefix = normalize_prefix(&cfg.server.prefix);
        Ok(cfg)
    }

    /// Replace the listen prefix, appending a trailing slash when absent.
    pub fn set_prefix(&mut self, prefix: &str) {
        self.server.prefix = normalize_prefix(prefix);
    }

    /// Parse the listen prefix into a socket address.
    ///
    /// Only `http://` prefixes are accepted; the host part may be a name
    /// (such as `localhost`) and is resolved here. A host without an explicit
    /// port listens on port 80.
    pub fn listen_addr(&self) -> Result<SocketAddr, Error> {
        let prefix = &self.server.prefix;
        let invalid = |reason: String| Error::InvalidPrefix {
            prefix: prefix.clone(),
            reason,
        };

        let rest = prefix
            .strip_prefix("http://")
            .ok_or_else(|| invalid("only http:// prefixes are supported".to_string()))?;
        let authority = rest.split('/').next().unwrap_or("");
        if authority.is_empty() {
            return Err(invalid("missing host".to_string()));
        }

        let with_port = if authority.contains(':') {
            authority.to_string()
        } else {
            format!("{authority}:80")
        };

        with_port
            .to_socket_addrs()
            .map_err(|e| invalid(format!("cannot resolve '{with_port}': {e}")))?
            .next()
            .ok_or_else(|| invalid(format!("'{with_port}' resolved to no addresses")))
    }
}

/// Append a trailing slash to a listen prefix when it is missing.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}
