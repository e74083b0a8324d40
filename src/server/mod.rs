//! Server module.
//!
//! Listener binding, the accept loop, and graceful shutdown.

mod listener;
pub mod signal;

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

use crate::config::ServeState;
use crate::error::Error;
use crate::handler;
use crate::logger;

pub use signal::ShutdownSignal;

/// Static content server: a bound listener plus shared request state.
pub struct Server {
    listener: TcpListener,
    state: Arc<ServeState>,
}

impl Server {
    /// Bind the listen address.
    ///
    /// Fails with [`Error::Bind`] when the address is already in use or
    /// otherwise unavailable; callers treat that as fatal.
    pub fn bind(addr: SocketAddr, state: Arc<ServeState>) -> Result<Self, Error> {
        let listener =
            listener::create_listener(addr).map_err(|source| Error::Bind { addr, source })?;
        Ok(Self { listener, state })
    }

    /// The address actually bound. Meaningful when binding port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until shutdown is requested.
    ///
    /// Every accepted connection is served on its own task, with no in-flight
    /// bound and no per-request timeout; requests share no mutable state, so
    /// an error in one never affects another or the accept loop. On shutdown
    /// the listener closes immediately, idle keep-alive connections are told
    /// to close, and in-flight requests are drained to natural completion.
    pub async fn run(self, shutdown: Arc<ShutdownSignal>) -> Result<(), Error> {
        let Self { listener, state } = self;
        let mut handlers = JoinSet::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, _peer_addr)) => {
                            handlers.spawn(serve_connection(
                                stream,
                                Arc::clone(&state),
                                Arc::clone(&shutdown),
                            ));
                        }
                        Err(e) => {
                            // Accept failures during teardown are expected.
                            if shutdown.is_triggered() {
                                break;
                            }
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                // Discard finished connection tasks as they complete so the
                // set only ever holds in-flight connections.
                Some(_) = handlers.join_next(), if !handlers.is_empty() => {}

                () = shutdown.wait() => break,
            }
        }

        drop(listener);
        while handlers.join_next().await.is_some() {}
        Ok(())
    }
}

/// Serve HTTP/1.1 on one accepted connection.
///
/// On shutdown the connection is told to finish its current response and
/// close instead of idling in keep-alive for the client's next request.
async fn serve_connection(stream: TcpStream, state: Arc<ServeState>, shutdown: Arc<ShutdownSignal>) {
    let io = TokioIo::new(stream);
    let conn = http1::Builder::new().serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&state))),
    );
    let mut conn = std::pin::pin!(conn);

    let result = tokio::select! {
        res = conn.as_mut() => res,
        () = shutdown.wait() => {
            conn.as_mut().graceful_shutdown();
            conn.await
        }
    };

    if let Err(err) = result {
        logger::log_connection_error(&err);
    }
}
