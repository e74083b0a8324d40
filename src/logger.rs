//! Logging helpers.
//!
//! Plain timestamped lines on stdout/stderr; access lines are gated by the
//! `logging.access_log` setting at the call site.

use std::net::SocketAddr;
use std::path::Path;

use chrono::Local;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn write_info(message: &str) {
    println!("[{}] {message}", timestamp());
}

fn write_error(message: &str) {
    eprintln!("[{}] {message}", timestamp());
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, fallback: Option<&Path>) {
    write_info(&format!("Serving {} on http://{addr}/", root.display()));
    match fallback {
        Some(dir) => write_info(&format!("Fallback root: {}", dir.display())),
        None => write_info("Fallback root: none"),
    }
    write_info("Press Ctrl+C to stop.");
}

pub fn log_request(method: &hyper::Method, path: &str, status: u16, bytes: usize) {
    write_info(&format!("{method} {path} -> {status} ({bytes} bytes)"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_shutdown_requested() {
    write_info("Interrupt received, shutting down listener");
}

pub fn log_shutdown_complete() {
    write_info("Server stopped");
}
