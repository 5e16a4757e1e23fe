//! HTTP/JSON catalog API
//!
//! Serves any [`CatalogService`] over the routes documented in [`routes`].
//! Requests are answered one at a time on the calling thread; a
//! [`ShutdownHandle`] taken before [`ApiServer::run`] stops the loop from
//! another thread.

pub mod error;
pub mod routes;

pub use error::{Result, ServerError};
pub use routes::{ApiResponse, handle};

use crate::service::CatalogService;
use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Header, Request, Response, Server};
use tracing::{info, warn};

/// Catalog API server
pub struct ApiServer<S> {
    server: Arc<Server>,
    service: S,
}

/// Stops a running [`ApiServer`] from another thread
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
}

impl ShutdownHandle {
    /// Make the accept loop return
    pub fn shutdown(&self) {
        self.server.unblock();
    }
}

impl<S: CatalogService> ApiServer<S> {
    /// Bind `addr` and serve `service`
    ///
    /// Use port 0 to let the OS pick a free port, then read it back with
    /// [`local_addr`](Self::local_addr).
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the address cannot be bound.
    pub fn bind(addr: &str, service: S) -> Result<Self> {
        let server = Server::http(addr).map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            server: Arc::new(server),
            service,
        })
    }

    /// Address actually bound
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
        }
    }

    /// Serve requests until shut down
    ///
    /// Failures to answer a single request are logged and do not stop the
    /// loop.
    pub fn run(&self) {
        if let Some(addr) = self.local_addr() {
            info!(%addr, "catalog API listening");
        }

        for request in self.server.incoming_requests() {
            if let Err(e) = self.answer(request) {
                warn!(error = %e, "failed to answer request");
            }
        }

        info!("catalog API stopped");
    }

    fn answer(&self, mut request: Request) -> Result<()> {
        let mut body = String::new();
        request.as_reader().read_to_string(&mut body)?;

        let method = request.method().as_str().to_string();
        let path = request.url().to_string();
        let response = handle(&self.service, &method, &path, &body);
        info!(%method, %path, status = response.status, "request");

        let mut reply =
            Response::from_string(response.body.to_string()).with_status_code(response.status);
        if let Ok(header) = Header::from_bytes("Content-Type", "application/json") {
            reply = reply.with_header(header);
        }
        request.respond(reply)?;
        Ok(())
    }
}
