//! HTTP protocol layer.
//!
//! MIME detection and response building, decoupled from request resolution.

pub mod mime;
pub mod response;

pub use response::{build_file_response, build_not_found_response};
