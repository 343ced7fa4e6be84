// crates/scim-harness-server/src/server.rs
// ============================================================================
// Module: Mock SCIM Server
// Description: TLS listener binding every resource type to the mock handler.
// Purpose: Serve the mock endpoint concurrently and report fatal errors over
//          a channel instead of crashing the process.
// Dependencies: scim-harness-core, axum, axum-server, tokio
// ============================================================================

//! ## Overview
//! The mock server registers each resource type under `/<ResourceType>` and
//! its trailing-slash variant and serves them over TLS for the process
//! lifetime. It runs on its own tokio task; TLS-material and serve failures
//! are delivered once over a bounded channel which the orchestrator polls
//! non-blockingly at the start of every test case. There is no shutdown
//! mechanism: the harness exits, the task dies with it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::any;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use scim_harness_core::FailureInjection;
use scim_harness_core::TranscriptSink;
use tokio::sync::mpsc;

use crate::endpoint::MockState;
use crate::endpoint::RequestSink;
use crate::endpoint::handle_scim;
use crate::resource::ResourceType;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Listener configuration for the mock server.
#[derive(Debug, Clone)]
pub struct MockServerConfig {
    /// Socket address to bind.
    pub bind: SocketAddr,
    /// TLS certificate PEM path.
    pub cert: PathBuf,
    /// TLS private key PEM path.
    pub key: PathBuf,
}

// ============================================================================
// SECTION: Mock Server
// ============================================================================

/// Mock SCIM server instance, ready to spawn.
#[derive(Debug)]
pub struct MockServer {
    /// Listener configuration.
    config: MockServerConfig,
    /// Sink registration per resource type; key set fixed at startup.
    registry: HashMap<ResourceType, RequestSink>,
    /// Failure-injection handle shared with the orchestrator.
    failure: FailureInjection,
}

impl MockServer {
    /// Builds a server with an explicit sink registration.
    #[must_use]
    pub fn new(
        config: MockServerConfig,
        registry: HashMap<ResourceType, RequestSink>,
        failure: FailureInjection,
    ) -> Self {
        Self {
            config,
            registry,
            failure,
        }
    }

    /// Builds a suite-mode server: every resource type records into the one
    /// shared transcript sink.
    #[must_use]
    pub fn shared(
        config: MockServerConfig,
        sink: &TranscriptSink,
        failure: FailureInjection,
    ) -> Self {
        let registry = ResourceType::ALL
            .into_iter()
            .map(|resource| (resource, RequestSink::Transcript(sink.clone())))
            .collect();
        Self::new(config, registry, failure)
    }

    /// Builds a standalone-mode server: every resource type logs to its own
    /// `<ResourceType>.log` file under `log_dir`.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when a log file cannot be created.
    pub fn standalone(config: MockServerConfig, log_dir: &Path) -> io::Result<Self> {
        let mut registry = HashMap::new();
        for resource in ResourceType::ALL {
            let path = log_dir.join(format!("{}.log", resource.as_str()));
            registry.insert(resource, RequestSink::log_file(&path)?);
        }
        Ok(Self::new(config, registry, FailureInjection::new()))
    }

    /// Spawns the server onto a background task and returns its handle.
    #[must_use]
    pub fn spawn(self) -> MockServerHandle {
        let (errors_tx, errors) = mpsc::channel(1);
        let listener = Handle::new();
        let state = Arc::new(MockState {
            registry: self.registry,
            failure: self.failure,
        });
        let app = build_router(&state);
        let config = self.config;
        let serve_handle = listener.clone();
        // The task runs for the process lifetime; errors come back over the
        // channel, so the join handle itself is never awaited.
        let _ = tokio::spawn(async move {
            let tls = match RustlsConfig::from_pem_file(&config.cert, &config.key).await {
                Ok(tls) => tls,
                Err(err) => {
                    let _ = errors_tx.send(MockServerError::Tls(err.to_string())).await;
                    return;
                }
            };
            let result = axum_server::bind_rustls(config.bind, tls)
                .handle(serve_handle)
                .serve(app.into_make_service())
                .await;
            if let Err(err) = result {
                let _ = errors_tx.send(MockServerError::Serve(err.to_string())).await;
            }
        });
        MockServerHandle {
            errors,
            listener,
        }
    }
}

/// Builds the route table from the sink registration.
fn build_router(state: &Arc<MockState>) -> Router {
    let mut router: Router<Arc<MockState>> = Router::new();
    for resource in state.registry.keys() {
        let path = format!("/{}", resource.as_str());
        router = router.route(&path, any(handle_scim));
        router = router.route(&format!("{path}/"), any(handle_scim));
    }
    router.with_state(Arc::clone(state))
}

// ============================================================================
// SECTION: Server Handle
// ============================================================================

/// Handle for a spawned mock server.
pub struct MockServerHandle {
    /// Error channel; carries at most one fatal server error.
    errors: mpsc::Receiver<MockServerError>,
    /// Listener handle, used to observe the bound address.
    listener: Handle<SocketAddr>,
}

impl MockServerHandle {
    /// Returns a pending fatal server error without blocking.
    ///
    /// A server task that terminated without reporting is also surfaced as
    /// an error: the listener is supposed to outlive every test case.
    pub fn try_error(&mut self) -> Option<MockServerError> {
        match self.errors.try_recv() {
            Ok(error) => Some(error),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                Some(MockServerError::Serve("mock server task terminated".to_string()))
            }
        }
    }

    /// Waits for a fatal server error; used by standalone logging mode,
    /// which has nothing else to do.
    pub async fn wait_error(&mut self) -> MockServerError {
        self.errors
            .recv()
            .await
            .unwrap_or_else(|| MockServerError::Serve("mock server task terminated".to_string()))
    }

    /// Returns the bound address once the listener is up.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.listening().await
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Mock server errors, delivered over the handle's error channel.
#[derive(Debug, thiserror::Error)]
pub enum MockServerError {
    /// TLS certificate or key material failed to load.
    #[error("tls error: {0}")]
    Tls(String),
    /// The listener failed to bind or serve.
    #[error("serve error: {0}")]
    Serve(String),
}
