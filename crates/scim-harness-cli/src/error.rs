// crates/scim-harness-cli/src/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Harness-fatal error type for the suite driver and orchestrator.
// Purpose: Distinguish run-terminating defects from ordinary case failures.
// Dependencies: scim-harness-core, scim-harness-server, thiserror
// ============================================================================

//! ## Overview
//! Every variant here terminates the whole run: malformed fixtures, failing
//! collaborator scripts, a crashing client, or a dead mock server are harness
//! defects, not test outcomes. Ordinary step failures are modeled as
//! [`crate::orchestrator::CaseOutcome`] values instead and never pass through
//! this type.

use scim_harness_core::SpecError;
use scim_harness_server::MockServerError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Harness-fatal errors; any of these terminates the whole run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A test spec could not be loaded or parsed.
    #[error("spec error: {0}")]
    Spec(String),
    /// A backing-service collaborator script failed.
    #[error("script error: {0}")]
    Script(String),
    /// The client under test could not be run or exited non-zero.
    #[error("client error: {0}")]
    Client(String),
    /// An expected-requests fixture could not be read.
    #[error("fixture error: {0}")]
    Fixture(String),
    /// The mock server reported a fatal error.
    #[error("server error: {0}")]
    Server(String),
    /// Suite-level failure: discovery or backing-service readiness.
    #[error("suite error: {0}")]
    Suite(String),
}

impl From<SpecError> for HarnessError {
    fn from(error: SpecError) -> Self {
        Self::Spec(error.to_string())
    }
}

impl From<MockServerError> for HarnessError {
    fn from(error: MockServerError) -> Self {
        Self::Server(error.to_string())
    }
}
