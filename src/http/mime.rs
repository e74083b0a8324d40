//! MIME type table.
//!
//! Maps file extensions to Content-Type values. Lookups are case-insensitive
//! and consult exactly one entry; anything unknown falls back to
//! `application/octet-stream`.

use std::collections::HashMap;

/// Fallback for extensions with no table entry.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Built-in entries, keyed by lowercase extension without the dot.
const BUILTIN: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("css", "text/css; charset=utf-8"),
    ("js", "application/javascript; charset=utf-8"),
    ("json", "application/json; charset=utf-8"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("ico", "image/x-icon"),
];

/// Extension to content-type table, fixed after construction.
#[derive(Debug)]
pub struct MimeTypes {
    map: HashMap<String, String>,
}

impl MimeTypes {
    /// Build the table from the built-in entries plus configured overrides.
    /// Override keys are lowercased; on conflict the override wins.
    #[must_use]
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut map: HashMap<String, String> = BUILTIN
            .iter()
            .map(|&(ext, ty)| (ext.to_string(), ty.to_string()))
            .collect();
        for (ext, ty) in overrides {
            map.insert(ext.to_lowercase(), ty.clone());
        }
        Self { map }
    }

    /// Get the Content-Type for a file extension.
    ///
    /// # Examples
    /// ```
    /// use previewd::http::mime::MimeTypes;
    /// let mime = MimeTypes::default();
    /// assert_eq!(mime.lookup(Some("html")), "text/html; charset=utf-8");
    /// assert_eq!(mime.lookup(Some("JSON")), "application/json; charset=utf-8");
    /// assert_eq!(mime.lookup(None), "application/octet-stream");
    /// ```
    #[must_use]
    pub fn lookup(&self, extension: Option<&str>) -> &str {
        extension
            .and_then(|ext| self.map.get(&ext.to_lowercase()))
            .map_or(OCTET_STREAM, String::as_str)
    }
}

impl Default for MimeTypes {
    fn default() -> Self {
        Self::with_overrides(&HashMap::new())
    }
}
