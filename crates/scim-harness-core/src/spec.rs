// crates/scim-harness-core/src/spec.rs
// ============================================================================
// Module: Test Spec Model
// Description: Typed model for per-case spec.json documents.
// Purpose: Parse test cases into strongly-typed steps with explicit defaults.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A test case is described by a `spec.json` document in its case directory:
//! a description, the client configuration file to run against, and an
//! ordered list of steps. The on-disk field names are PascalCase; unknown
//! fields are rejected so that fixture typos surface as parse errors rather
//! than silently zero-valued steps.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A whole test case: an ordered sequence of steps sharing one client config.
///
/// Loaded once per case directory and immutable afterwards. An empty `steps`
/// list is legal but vacuous.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestSpec {
    /// Human-readable case description, echoed when the case starts.
    #[serde(rename = "Description")]
    pub description: String,
    /// Client configuration file, relative to the test root.
    #[serde(rename = "Config")]
    pub config: PathBuf,
    /// Ordered test steps; order is significant and not reorderable.
    #[serde(rename = "Steps", default)]
    pub steps: Vec<TestStep>,
}

/// One test step: scenarios to apply, the expected transcript, and the
/// error-injection policy for the client run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestStep {
    /// Scenario names applied to the backing store, in this order.
    #[serde(rename = "Scenario", default)]
    pub scenario: Vec<String>,
    /// Expected-requests fixture, relative to the case directory; empty
    /// means the step expects an empty transcript.
    #[serde(rename = "Requests", default)]
    pub requests: String,
    /// HTTP status forced on every mock response during this step; 0 means
    /// no injected failure.
    #[serde(rename = "FailWith", default)]
    pub fail_with: u16,
    /// Whether the client is expected to report errors on stderr.
    #[serde(rename = "ExpectErrors", default)]
    pub expect_errors: bool,
}

impl TestSpec {
    /// Loads and parses a `spec.json` document.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the file cannot be read or does not parse
    /// into the expected shape. Both are fixture authoring defects and are
    /// fatal to the whole run, not just the case.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let raw = fs::read_to_string(path).map_err(|err| SpecError::Read {
            path: path.display().to_string(),
            error: err.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|err| SpecError::Parse {
            path: path.display().to_string(),
            error: err.to_string(),
        })
    }
}

impl TestStep {
    /// Returns the expected-requests fixture path, if the step names one.
    #[must_use]
    pub fn requests_fixture(&self) -> Option<&Path> {
        if self.requests.is_empty() { None } else { Some(Path::new(&self.requests)) }
    }

    /// Returns the injected failure status, if the step forces one.
    #[must_use]
    pub const fn injected_failure(&self) -> Option<u16> {
        if self.fail_with == 0 { None } else { Some(self.fail_with) }
    }

    /// Whether the client is expected to be noisy on stderr during this
    /// step, either because errors are declared or a failure is injected.
    #[must_use]
    pub const fn expects_stderr(&self) -> bool {
        self.expect_errors || self.fail_with != 0
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Test spec load failures.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// The spec file could not be read.
    #[error("failed to read test spec {path}: {error}")]
    Read {
        /// Spec file path.
        path: String,
        /// Underlying read error.
        error: String,
    },
    /// The spec file is not a valid test spec document.
    #[error("failed to parse test spec {path}: {error}")]
    Parse {
        /// Spec file path.
        path: String,
        /// Underlying parse error.
        error: String,
    },
}

// ============================================================================
// SECTION: Tests
// ============================================================================
