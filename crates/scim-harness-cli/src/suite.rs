// crates/scim-harness-cli/src/suite.rs
// ============================================================================
// Module: Suite Driver
// Description: Backing-service lifecycle and sequential case execution.
// Purpose: Start LDAP, wait for readiness, discover cases, run them all.
// Dependencies: scim-harness-core, scim-harness-server, tokio
// ============================================================================

//! ## Overview
//! The suite driver owns the backing directory service's lifecycle: start it,
//! poll its readiness probe with a bounded retry budget, then allow a fixed
//! settle delay before the first case. Test cases are the subdirectories of
//! `<testroot>/tests`, run sequentially in directory-listing order. A halted
//! case is reported and the driver moves on; only harness defects abort the
//! run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use scim_harness_core::FailureInjection;
use scim_harness_core::TranscriptSink;
use scim_harness_server::MockServerHandle;
use tokio::time::sleep;

use crate::error::HarnessError;
use crate::orchestrator::CaseContext;
use crate::orchestrator::CaseOutcome;
use crate::orchestrator::run_case;
use crate::output;
use crate::scripts;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum readiness probes before giving up on the backing service.
const READINESS_ATTEMPTS: u32 = 10;

/// Delay between readiness probes.
const READINESS_DELAY: Duration = Duration::from_secs(1);

/// Grace period after the first successful probe; the backing service
/// needs it to finish internal initialization.
const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Directory of test-case subdirectories under the test root.
const TESTS_DIR: &str = "tests";

// ============================================================================
// SECTION: Suite Configuration
// ============================================================================

/// Configuration for one suite run.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Root directory holding `scripts/` and `tests/`.
    pub testroot: PathBuf,
    /// Client-under-test executable.
    pub binary: PathBuf,
    /// TLS certificate passed through to the client.
    pub cert: PathBuf,
    /// TLS key passed through to the client.
    pub key: PathBuf,
    /// Directory receiving mismatch artifact files.
    pub artifact_dir: PathBuf,
}

// ============================================================================
// SECTION: Suite Driver
// ============================================================================

/// Runs every discovered test case against the already-running mock server.
///
/// # Errors
///
/// Returns [`HarnessError`] when the backing service cannot be started or
/// never becomes ready, when case discovery fails, or when a case hits a
/// run-fatal condition. Halted cases are reported and do not abort the run.
pub async fn run_suite(
    config: &SuiteConfig,
    sink: &TranscriptSink,
    failure: &FailureInjection,
    server: &mut MockServerHandle,
) -> Result<(), HarnessError> {
    scripts::run_script(&scripts::script_path(&config.testroot, "start_test_ldap"), &[]).await?;
    wait_for_directory_ready(&config.testroot).await?;
    sleep(SETTLE_DELAY).await;

    let suite_dir = config.testroot.join(TESTS_DIR);
    for name in discover_cases(&suite_dir)? {
        let case_dir = suite_dir.join(&name);
        let ctx = CaseContext {
            name: &name,
            case_dir: &case_dir,
            testroot: &config.testroot,
            binary: &config.binary,
            cert: &config.cert,
            key: &config.key,
            artifact_dir: &config.artifact_dir,
            sink,
            failure,
        };
        match run_case(&ctx, server).await? {
            CaseOutcome::Passed => {}
            CaseOutcome::Halted {
                step,
                reason,
            } => {
                let _ = output::write_stderr_line(&format!(
                    "test '{name}' halted at step {step}: {reason}"
                ));
            }
        }
    }
    Ok(())
}

/// Polls the readiness probe until it succeeds or the budget is exhausted.
async fn wait_for_directory_ready(testroot: &Path) -> Result<(), HarnessError> {
    let probe = scripts::script_path(testroot, "ldap_isup");
    for _ in 0..READINESS_ATTEMPTS {
        if scripts::probe_script(&probe).await {
            return Ok(());
        }
        sleep(READINESS_DELAY).await;
    }
    Err(HarnessError::Suite("failed to connect to LDAP".to_string()))
}

/// Lists test cases: the subdirectories of the suite directory, in
/// directory-listing order.
fn discover_cases(suite_dir: &Path) -> Result<Vec<String>, HarnessError> {
    let entries = fs::read_dir(suite_dir).map_err(|err| {
        HarnessError::Suite(format!("failed to read test directory {}: {err}", suite_dir.display()))
    })?;
    let mut cases = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            HarnessError::Suite(format!(
                "failed to list test directory {}: {err}",
                suite_dir.display()
            ))
        })?;
        let is_dir = entry
            .file_type()
            .map_err(|err| {
                HarnessError::Suite(format!(
                    "failed to inspect {}: {err}",
                    entry.path().display()
                ))
            })?
            .is_dir();
        if is_dir {
            cases.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(cases)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
