// crates/scim-harness-core/src/lib.rs
// ============================================================================
// Module: SCIM Harness Core
// Description: Test-case model and shared state for the SCIM client harness.
// Purpose: Provide spec parsing, transcript capture, and failure injection.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types for the SCIM client test harness: the `spec.json` test-case
//! model, the shared request transcript sink, the per-step failure-injection
//! handle, and the whitespace-insensitive golden-transcript comparison. The
//! mock server and the orchestrator both build on this crate; it holds no
//! networking or process code of its own.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod compare;
pub mod failure;
pub mod spec;
pub mod transcript;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use compare::transcripts_match;
pub use compare::trim_transcript;
pub use failure::FailureInjection;
pub use spec::SpecError;
pub use spec::TestSpec;
pub use spec::TestStep;
pub use transcript::TranscriptSink;
