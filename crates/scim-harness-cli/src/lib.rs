// crates/scim-harness-cli/src/lib.rs
// ============================================================================
// Module: SCIM Harness CLI Library
// Description: Suite driver, test orchestrator, and collaborator plumbing.
// Purpose: Drive the SCIM client under test through scripted scenarios.
// Dependencies: scim-harness-core, scim-harness-server, tokio, tempfile
// ============================================================================

//! ## Overview
//! Everything behind the `scim-harness` binary: the suite driver that manages
//! the backing LDAP lifecycle and discovers test cases, the per-case
//! orchestrator state machine, the collaborator-script invocation layer, and
//! the stdout/stderr output helpers. The binary in `main.rs` is a thin
//! argument-parsing shell over this crate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod orchestrator;
pub mod output;
pub mod scripts;
pub mod suite;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::HarnessError;
pub use orchestrator::CaseContext;
pub use orchestrator::CaseOutcome;
pub use orchestrator::StepFailure;
pub use orchestrator::run_case;
pub use suite::SuiteConfig;
pub use suite::run_suite;
