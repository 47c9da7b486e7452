//! Stub server: one listener serving both stub traffic and the admin API.

use super::router::route_request;
use super::state::ServerState;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

pub struct StubServer {
    listener: TcpListener,
    state: Arc<ServerState>,
}

impl StubServer {
    /// Bind the listener. Port 0 picks an ephemeral port; see
    /// [`local_addr`](Self::local_addr).
    pub async fn bind(addr: &str, state: ServerState) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            state: Arc::new(state),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, anyhow::Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the process exits.
    pub async fn run(self) -> Result<(), anyhow::Error> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` completes. In-flight connections are left to
    /// finish on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), anyhow::Error>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        info!(
            "Decoy listening on http://{} (admin API under {})",
            addr, self.state.admin_prefix
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, _)) => {
                            let state = Arc::clone(&self.state);
                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                let service = service_fn(move |req| {
                                    let state = Arc::clone(&state);
                                    async move { route_request(req, state).await }
                                });
                                if let Err(e) = http1::Builder::new()
                                    .serve_connection(io, service)
                                    .await
                                {
                                    debug!("Connection error: {}", e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Accept error on {}: {}", addr, e);
                        }
                    }
                }
                _ = &mut shutdown => {
                    info!("Decoy on {} shutting down", addr);
                    break;
                }
            }
        }
        Ok(())
    }
}
