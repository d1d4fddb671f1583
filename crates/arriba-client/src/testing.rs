//! Test utilities for arriba-client
//!
//! Runs an axum router on an ephemeral port. Used both to stand in for the
//! vendor portal and to serve the wrapper's own router in end-to-end tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{ClientConfig, InstantOnClient, VendorError, VendorResult};

/// Router served on a loopback port until dropped or shut down
pub struct TestServer {
    pub addr: SocketAddr,
    running: Option<Running>,
}

struct Running {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Serve an axum Router on 127.0.0.1 with an OS-assigned port
    ///
    /// The listener is bound before this returns, so requests can be sent
    /// immediately.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use arriba_client::testing::TestServer;
    ///
    /// let vendor = Router::new().route("/api/sites", get(sites));
    /// let server = TestServer::start(vendor).await?;
    ///
    /// let client = server.vendor_client()?;
    /// let sites = client.list_sites("token").await?;
    /// ```
    pub async fn start<S>(router: axum::Router<S>) -> VendorResult<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        let bind_failed =
            |e: std::io::Error| VendorError::Internal(format!("Failed to bind test server: {}", e));
        let listener = TcpListener::bind("127.0.0.1:0").await.map_err(bind_failed)?;
        let addr = listener.local_addr().map_err(bind_failed)?;

        let (stop, stopped) = oneshot::channel::<()>();
        let app: axum::Router = router.into();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                stopped.await.ok();
            });
            if let Err(e) = serve.await {
                tracing::warn!(%addr, error = %e, "Test server exited with error");
            }
        });

        Ok(Self {
            addr,
            running: Some(Running { stop, task }),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client settings pointing both vendor services at this server.
    ///
    /// Auth routes live at the root, device-management routes under `/api`.
    pub fn vendor_config(&self) -> ClientConfig {
        ClientConfig {
            auth_url: self.base_url(),
            api_url: format!("{}/api", self.base_url()),
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// An [`InstantOnClient`] talking to this server
    pub fn vendor_client(&self) -> VendorResult<InstantOnClient> {
        InstantOnClient::with_config(&self.vendor_config())
    }

    /// Stop accepting connections and wait for in-flight requests to finish
    pub async fn shutdown(mut self) {
        if let Some(Running { stop, task }) = self.running.take() {
            stop.send(()).ok();
            task.await.ok();
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(Running { stop, task }) = self.running.take() {
            stop.send(()).ok();
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn vendor_config_splits_auth_and_api() {
        let server = TestServer::start(axum::Router::new()).await.unwrap();
        let config = server.vendor_config();

        assert_eq!(config.auth_url, server.base_url());
        assert_eq!(config.api_url, format!("http://{}/api", server.addr));
        assert!(config.api_url.starts_with("http://127.0.0.1:"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn serves_immediately_and_stops_on_shutdown() {
        let router = axum::Router::new().route("/ping", axum::routing::get(|| async { "pong" }));
        let server = TestServer::start(router).await.unwrap();
        let url = format!("{}/ping", server.base_url());

        let body = reqwest::get(&url).await.unwrap().text().await.unwrap();
        assert_eq!(body, "pong");

        server.shutdown().await;
        assert!(reqwest::get(&url).await.is_err());
    }
}
