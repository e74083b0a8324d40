//! Request handler module.
//!
//! Entry point for HTTP request processing: decodes the path, resolves it to
//! a local file and builds the response. Method and body are ignored; every
//! request is answered from the filesystem.

pub mod static_files;

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::{Request, Response};
use percent_encoding::percent_decode_str;

use crate::config::ServeState;
use crate::error::Error;
use crate::http;
use crate::logger;

/// Per-request context, created on each request and dropped with the
/// response. Nothing persists across requests.
pub struct RequestContext {
    /// Path exactly as it appeared on the request line.
    pub raw_path: String,
    /// Percent-decoded path, with the default document substituted for `/`.
    pub path: String,
}

impl RequestContext {
    fn new(raw_path: &str, default_document: &str) -> Self {
        let decoded = percent_decode_str(raw_path)
            .decode_utf8_lossy()
            .into_owned();
        let path = if decoded.trim().is_empty() || decoded == "/" {
            format!("/{default_document}")
        } else {
            decoded
        };
        Self {
            raw_path: raw_path.to_string(),
            path,
        }
    }
}

/// Main entry point for HTTP request handling.
///
/// A miss in both roots recovers into a 404 response; only a read failure
/// after successful resolution propagates as an error, which tears down the
/// connection without a structured body.
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<ServeState>,
) -> Result<Response<Full<Bytes>>, Error> {
    let method = req.method().clone();
    let ctx = RequestContext::new(req.uri().path(), &state.default_document);

    let (status, bytes, response) = match static_files::load(&state, &ctx.path).await? {
        Some((content, content_type)) => {
            let len = content.len();
            (200, len, http::build_file_response(content, content_type))
        }
        None => (
            404,
            http::response::NOT_FOUND_BODY.len(),
            http::build_not_found_response(),
        ),
    };

    if state.access_log {
        logger::log_request(&method, &ctx.raw_path, status, bytes);
    }

    Ok(response)
}
