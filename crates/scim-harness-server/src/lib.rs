// crates/scim-harness-server/src/lib.rs
// ============================================================================
// Module: SCIM Harness Server
// Description: Mock SCIM endpoint and TLS server for the client harness.
// Purpose: Produce deterministic, distinguishable responses and transcripts.
// Dependencies: scim-harness-core, axum, axum-server, tokio
// ============================================================================

//! ## Overview
//! The mock server binds one handler per SCIM resource type over TLS and
//! records every inbound request into a per-type sink. Responses are
//! deterministic and deliberately distinguishable so the client under test
//! exercises its error paths: injected failures short-circuit everything,
//! mutating requests must carry the SCIM media type, reads are never served.
//! Fatal listener errors surface once over an error channel polled by the
//! orchestrator instead of crashing the process.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod endpoint;
pub mod resource;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use endpoint::RequestSink;
pub use endpoint::SCIM_MEDIA_TYPE;
pub use resource::ResourceType;
pub use server::MockServer;
pub use server::MockServerConfig;
pub use server::MockServerError;
pub use server::MockServerHandle;
