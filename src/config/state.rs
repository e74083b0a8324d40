//! Resolved runtime state shared by all request handlers.

use std::io;
use std::path::PathBuf;

use crate::config::Config;
use crate::http::mime::MimeTypes;

/// Read-only state derived from [`Config`] at startup.
///
/// Roots are canonicalized exactly once here and never change afterwards, so
/// handlers can share this via `Arc` without locking.
#[derive(Debug)]
pub struct ServeState {
    /// Directory files are served from.
    pub primary_root: PathBuf,
    /// Parent of the primary root, consulted only when the primary misses.
    pub fallback_root: Option<PathBuf>,
    /// Document substituted for an empty or `/` request path.
    pub default_document: String,
    /// Whether resolved paths must stay inside the root they were joined to.
    pub strict_paths: bool,
    /// Whether to emit a log line per handled request.
    pub access_log: bool,
    /// Extension to content-type table.
    pub mime: MimeTypes,
}

impl ServeState {
    /// Resolve roots and build the MIME table from configuration.
    ///
    /// Fails when the primary root does not exist or cannot be canonicalized.
    pub fn new(config: &Config) -> io::Result<Self> {
        let root = match &config.serve.root {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };
        let primary_root = root.canonicalize()?;

        let fallback_root = if config.serve.fallback_parent {
            primary_root.parent().map(PathBuf::from)
        } else {
            None
        };

        Ok(Self {
            primary_root,
            fallback_root,
            default_document: config.serve.default_document.clone(),
            strict_paths: config.serve.strict_paths,
            access_log: config.logging.access_log,
            mime: MimeTypes::with_overrides(&config.mime),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingConfig, ServeConfig, ServerConfig, DEFAULT_PREFIX};
    use std::collections::HashMap;

    fn config_for_root(root: &std::path::Path, fallback_parent: bool) -> Config {
        Config {
            server: ServerConfig {
                prefix: DEFAULT_PREFIX.to_string(),
            },
            serve: ServeConfig {
                root: Some(root.display().to_string()),
                fallback_parent,
                default_document: "index.html".to_string(),
                strict_paths: true,
            },
            logging: LoggingConfig { access_log: false },
            mime: HashMap::new(),
        }
    }

    #[test]
    fn test_fallback_is_parent_of_primary() {
        let dir = tempfile::tempdir().unwrap();
        let state = ServeState::new(&config_for_root(dir.path(), true)).unwrap();
        assert_eq!(
            state.fallback_root.as_deref(),
            state.primary_root.parent()
        );
    }

    #[test]
    fn test_fallback_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let state = ServeState::new(&config_for_root(dir.path(), false)).unwrap();
        assert!(state.fallback_root.is_none());
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(ServeState::new(&config_for_root(&missing, true)).is_err());
    }
}
