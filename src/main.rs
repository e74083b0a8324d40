use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use previewd::config::{Config, ServeState};
use previewd::logger;
use previewd::server::{signal, Server, ShutdownSignal};

/// Local static-file server for previewing generated site content.
#[derive(Debug, Parser)]
#[command(name = "previewd", version, about)]
struct Args {
    /// Listen URL prefix, e.g. http://localhost:8080/
    prefix: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = Config::load()?;
    if let Some(prefix) = args.prefix.as_deref() {
        cfg.set_prefix(prefix);
    }

    let addr = cfg.listen_addr()?;
    let state = Arc::new(ServeState::new(&cfg)?);

    let server = Server::bind(addr, Arc::clone(&state))?;
    let bound = server.local_addr()?;

    let shutdown = Arc::new(ShutdownSignal::new());
    signal::install(Arc::clone(&shutdown))?;

    logger::log_server_start(&bound, &state.primary_root, state.fallback_root.as_deref());
    server.run(shutdown).await?;
    logger::log_shutdown_complete();

    Ok(())
}
