//! previewd - local static-file server for previewing generated site content.
//!
//! Serves files from a primary root directory (the working directory by
//! default) with a fallback to its parent, using an extension-based MIME
//! table. Built on Tokio and Hyper.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::Config;
pub use error::Error;
pub use server::Server;
