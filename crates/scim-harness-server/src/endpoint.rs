// crates/scim-harness-server/src/endpoint.rs
// ============================================================================
// Module: Mock SCIM Endpoint
// Description: The generic request handler behind every resource-type route.
// Purpose: Record transcripts and return deterministic, distinguishable
//          responses including forced failures.
// Dependencies: scim-harness-core, axum
// ============================================================================

//! ## Overview
//! One handler serves every resource type. Each invocation appends a
//! delimited transcript entry to the resource's sink, then answers: an
//! injected failure short-circuits everything; POST/PUT without the exact
//! SCIM media type is rejected with 415; DELETE succeeds empty; GET is never
//! implemented; everything else gets the fixed placeholder body. Responses
//! never carry request-derived content, so transcripts and response bodies
//! stay byte-deterministic across runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use scim_harness_core::FailureInjection;
use scim_harness_core::TranscriptSink;

use crate::resource::ResourceType;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// The only media type accepted on mutating requests.
pub const SCIM_MEDIA_TYPE: &str = "application/scim+json";

/// Body returned for every injected failure.
const FAILURE_BODY: &str = "Failing test step";

/// Body returned when a mutating request carries the wrong media type.
const BAD_MEDIA_TYPE_BODY: &str = "Bad media type";

/// Body returned for GET requests; the mock never serves reads.
const NOT_IMPLEMENTED_BODY: &str = "Not implemented";

/// Fixed placeholder body for accepted mutating requests.
const SUCCESS_BODY: &str = "Hello, World";

/// Opening and closing delimiter line of a transcript entry.
const ENTRY_DELIMITER: &str = "---\n";

// ============================================================================
// SECTION: Request Sinks
// ============================================================================

/// Destination for a resource type's transcript entries.
///
/// Suite runs share one [`TranscriptSink`] across all resource types;
/// standalone logging mode gives each type its own append-only log file.
#[derive(Debug, Clone)]
pub enum RequestSink {
    /// Shared in-memory transcript, compared against golden fixtures.
    Transcript(TranscriptSink),
    /// Per-resource-type log file for standalone logging mode.
    LogFile(Arc<Mutex<File>>),
}

impl RequestSink {
    /// Opens a log-file sink, truncating any previous log.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when the file cannot be created.
    pub fn log_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
        Ok(Self::LogFile(Arc::new(Mutex::new(file))))
    }

    /// Appends a transcript entry to the sink.
    pub fn append(&self, text: &str) {
        match self {
            Self::Transcript(sink) => sink.append(text),
            Self::LogFile(file) => {
                let Ok(mut file) = file.lock() else {
                    return;
                };
                let _ = file.write_all(text.as_bytes());
            }
        }
    }
}

// ============================================================================
// SECTION: Endpoint State
// ============================================================================

/// Shared state behind every resource-type route.
#[derive(Debug)]
pub(crate) struct MockState {
    /// Sink registration per resource type; key set fixed at startup.
    pub(crate) registry: HashMap<ResourceType, RequestSink>,
    /// Current injected failure status, set per step by the orchestrator.
    pub(crate) failure: FailureInjection,
}

// ============================================================================
// SECTION: Handler
// ============================================================================

/// Handles one inbound request for any registered resource type.
pub(crate) async fn handle_scim(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(resource) = ResourceType::parse(uri.path().trim_matches('/')) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(sink) = state.registry.get(&resource) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    // Record before responding, whatever the outcome.
    let body_text = String::from_utf8_lossy(&body);
    sink.append(&format_entry(resource, &method, &body_text));

    if let Some(status) = state.failure.current() {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, FAILURE_BODY.to_string()).into_response();
    }
    if (method == Method::POST || method == Method::PUT) && !has_scim_media_type(&headers) {
        log_diagnostic(&format!("invalid media type on {method} {}", uri.path()));
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, BAD_MEDIA_TYPE_BODY.to_string())
            .into_response();
    }
    if method == Method::DELETE {
        return StatusCode::NO_CONTENT.into_response();
    }
    if method == Method::GET {
        return (StatusCode::NOT_IMPLEMENTED, NOT_IMPLEMENTED_BODY.to_string()).into_response();
    }
    (StatusCode::OK, SUCCESS_BODY.to_string()).into_response()
}

/// Formats one delimited transcript entry.
///
/// The closing delimiter always sits on its own line; an empty body
/// contributes nothing between the method line and the delimiter.
#[must_use]
pub fn format_entry(resource: ResourceType, method: &Method, body: &str) -> String {
    let mut entry = String::with_capacity(body.len() + 64);
    entry.push_str(ENTRY_DELIMITER);
    entry.push_str(resource.as_str());
    entry.push(' ');
    entry.push_str(method.as_str());
    entry.push('\n');
    entry.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        entry.push('\n');
    }
    entry.push_str(ENTRY_DELIMITER);
    entry
}

/// Whether the request carries exactly the SCIM media type.
fn has_scim_media_type(headers: &HeaderMap) -> bool {
    headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok()) == Some(SCIM_MEDIA_TYPE)
}

/// Writes a handler diagnostic to stderr.
fn log_diagnostic(message: &str) {
    let mut stderr = io::stderr();
    let _ = writeln!(&mut stderr, "scim-harness-server: {message}");
}

// ============================================================================
// SECTION: Tests
// ============================================================================
