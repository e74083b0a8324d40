//! Path resolution and file loading.
//!
//! A decoded request path is joined to the primary root first, then to the
//! fallback root; the first existing regular file wins.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::ServeState;
use crate::error::Error;
use crate::logger;

/// Resolve a request path and read the file it names.
///
/// Returns `Ok(None)` when neither root holds a matching regular file. A read
/// failure after resolution succeeded is an [`Error::Stream`].
pub async fn load<'a>(
    state: &'a ServeState,
    path: &str,
) -> Result<Option<(Vec<u8>, &'a str)>, Error> {
    let Some(local_path) = resolve(state, path).await else {
        return Ok(None);
    };

    let content = fs::read(&local_path).await.map_err(|e| {
        logger::log_error(&format!(
            "Failed to read '{}': {e}",
            local_path.display()
        ));
        Error::Stream(e)
    })?;

    let content_type = state
        .mime
        .lookup(local_path.extension().and_then(|e| e.to_str()));
    Ok(Some((content, content_type)))
}

/// Resolve a decoded request path to a local file, primary root first.
pub async fn resolve(state: &ServeState, path: &str) -> Option<PathBuf> {
    let relative = path.trim_start_matches('/');

    if let Some(found) = check_root(state, &state.primary_root, relative, path).await {
        return Some(found);
    }
    if let Some(fallback) = &state.fallback_root {
        return check_root(state, fallback, relative, path).await;
    }
    None
}

/// Check one root for a regular file at the given relative path.
///
/// With `strict_paths` the candidate is canonicalized and must stay a
/// descendant of the root it was joined to; escapes are treated as misses.
async fn check_root(
    state: &ServeState,
    root: &Path,
    relative: &str,
    raw_path: &str,
) -> Option<PathBuf> {
    let candidate = root.join(relative);

    let metadata = fs::metadata(&candidate).await.ok()?;
    if !metadata.is_file() {
        return None;
    }

    if state.strict_paths {
        let canonical = fs::canonicalize(&candidate).await.ok()?;
        if !canonical.starts_with(root) {
            logger::log_warning(&format!(
                "Path escape blocked: {raw_path} -> {}",
                canonical.display()
            ));
            return None;
        }
        return Some(canonical);
    }

    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mime::MimeTypes;
    use std::collections::HashMap;

    fn state_for(primary: &Path, fallback: Option<&Path>, strict: bool) -> ServeState {
        ServeState {
            primary_root: primary.canonicalize().unwrap(),
            fallback_root: fallback.map(|p| p.canonicalize().unwrap()),
            default_document: "index.html".to_string(),
            strict_paths: strict,
            access_log: false,
            mime: MimeTypes::with_overrides(&HashMap::new()),
        }
    }

    #[tokio::test]
    async fn test_primary_root_wins() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("site");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("page.html"), "primary").unwrap();
        std::fs::write(base.path().join("page.html"), "fallback").unwrap();

        let state = state_for(&root, Some(base.path()), true);
        let resolved = resolve(&state, "/page.html").await.unwrap();
        assert!(resolved.starts_with(&state.primary_root));
    }

    #[tokio::test]
    async fn test_fallback_consulted_on_primary_miss() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("site");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(base.path().join("only-here.txt"), "fallback").unwrap();

        let state = state_for(&root, Some(base.path()), true);
        let resolved = resolve(&state, "/only-here.txt").await.unwrap();
        assert!(resolved.starts_with(base.path().canonicalize().unwrap()));
    }

    #[tokio::test]
    async fn test_miss_in_both_roots() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("site");
        std::fs::create_dir(&root).unwrap();

        let state = state_for(&root, Some(base.path()), true);
        assert!(resolve(&state, "/missing.png").await.is_none());
    }

    #[tokio::test]
    async fn test_directories_are_not_served() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("site");
        std::fs::create_dir(&root).unwrap();
        std::fs::create_dir(root.join("sub")).unwrap();

        let state = state_for(&root, None, true);
        assert!(resolve(&state, "/sub").await.is_none());
    }

    #[tokio::test]
    async fn test_strict_paths_blocks_escape() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("site");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(base.path().join("secret.txt"), "outside").unwrap();

        // Escapes the primary root and, one level further, the fallback too.
        let state = state_for(&root, None, true);
        assert!(resolve(&state, "/../secret.txt").await.is_none());
    }

    #[tokio::test]
    async fn test_lenient_paths_reproduce_unchecked_join() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("site");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(base.path().join("secret.txt"), "outside").unwrap();

        let state = state_for(&root, None, false);
        assert!(resolve(&state, "/../secret.txt").await.is_some());
    }

    #[tokio::test]
    async fn test_load_returns_bytes_and_content_type() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("site");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("data.json"), b"{\"ok\":true}").unwrap();

        let state = state_for(&root, None, true);
        let (content, content_type) = load(&state, "/data.json").await.unwrap().unwrap();
        assert_eq!(content, b"{\"ok\":true}");
        assert_eq!(content_type, "application/json; charset=utf-8");
    }
}
