// crates/scim-harness-cli/src/orchestrator.rs
// ============================================================================
// Module: Test Orchestrator
// Description: Per-case state machine driving scenarios, the client, and
//              transcript comparison.
// Purpose: Decide pass/fail per step and halt the case on first mismatch.
// Dependencies: scim-harness-core, scim-harness-server, tempfile
// ============================================================================

//! ## Overview
//! One call to [`run_case`] executes one test case: reset the backing store,
//! then for each step apply its scenarios, arm the failure injection, reset
//! the transcript sink, run the client under test, compare the captured
//! transcript against the golden fixture, and check the stderr policy. The
//! first failing step halts the case; halting is an ordinary outcome, while
//! collaborator and fixture defects are harness-fatal errors. The mock
//! server's error channel is polled at every step boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use scim_harness_core::FailureInjection;
use scim_harness_core::TestSpec;
use scim_harness_core::TestStep;
use scim_harness_core::TranscriptSink;
use scim_harness_core::transcripts_match;
use scim_harness_server::MockServerHandle;

use crate::error::HarnessError;
use crate::output;
use crate::scripts;

// ============================================================================
// SECTION: Case Context
// ============================================================================

/// Everything a single test case needs from its surroundings.
#[derive(Debug)]
pub struct CaseContext<'a> {
    /// Case name (its directory name), used in output and artifact names.
    pub name: &'a str,
    /// Case directory holding `spec.json` and its fixtures.
    pub case_dir: &'a Path,
    /// Test root holding `scripts/` and the client config files.
    pub testroot: &'a Path,
    /// Client-under-test executable.
    pub binary: &'a Path,
    /// TLS certificate passed through to the client.
    pub cert: &'a Path,
    /// TLS key passed through to the client.
    pub key: &'a Path,
    /// Directory receiving mismatch artifact files.
    pub artifact_dir: &'a Path,
    /// Shared transcript sink written by the mock server.
    pub sink: &'a TranscriptSink,
    /// Failure-injection handle read by the mock endpoint.
    pub failure: &'a FailureInjection,
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Terminal state of one test case. Both variants are non-fatal to the
/// suite; the driver proceeds to the next case either way.
#[derive(Debug, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Every step completed and matched.
    Passed,
    /// A step failed; later steps did not run.
    Halted {
        /// Zero-based index of the failing step.
        step: usize,
        /// What the step failed on.
        reason: StepFailure,
    },
}

/// Why a step halted its case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepFailure {
    /// The captured transcript did not match the expected fixture.
    TranscriptMismatch,
    /// The client wrote to stderr although the step expected silence.
    UnexpectedStderr,
    /// The step expected errors but the client was silent on stderr.
    MissingStderr,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TranscriptMismatch => "received requests did not match expected requests",
            Self::UnexpectedStderr => "client printed to stderr unexpectedly",
            Self::MissingStderr => "expected errors on stderr, but the client was silent",
        };
        f.write_str(label)
    }
}

// ============================================================================
// SECTION: Orchestration
// ============================================================================

/// Runs one test case to its terminal state.
///
/// # Errors
///
/// Returns [`HarnessError`] for run-fatal conditions: spec load failures,
/// collaborator script failures, a crashing client, unreadable fixtures, or
/// a pending mock-server error. Step failures are reported through
/// [`CaseOutcome::Halted`], not through errors.
pub async fn run_case(
    ctx: &CaseContext<'_>,
    server: &mut MockServerHandle,
) -> Result<CaseOutcome, HarnessError> {
    let spec = TestSpec::load(&ctx.case_dir.join("spec.json"))?;

    scripts::run_script(&scripts::script_path(ctx.testroot, "reset_ldap"), &[]).await?;

    let _ = output::write_stdout_line(&format!(
        "Running test '{}' - {}",
        ctx.name, spec.description
    ));

    let cache = CachePath::allocate()?;
    for (index, step) in spec.steps.iter().enumerate() {
        if let Some(error) = server.try_error() {
            return Err(error.into());
        }

        for scenario in &step.scenario {
            let apply = scripts::script_path(ctx.testroot, "apply_scenario");
            scripts::run_script(&apply, &[scenario]).await?;
        }

        match step.injected_failure() {
            Some(status) => ctx.failure.set(status),
            None => ctx.failure.clear(),
        }
        ctx.sink.reset();

        let run = scripts::run_client(ctx.binary, &client_args(ctx, &cache, &spec.config)).await?;

        // The client has exited, so every request it issued has been
        // handled and appended; the snapshot is complete.
        let expected = read_expected(ctx.case_dir, step)?;
        let received = ctx.sink.snapshot();
        if !transcripts_match(&expected, &received) {
            write_mismatch_artifacts(ctx, index, &expected, &received);
            return Ok(CaseOutcome::Halted {
                step: index,
                reason: StepFailure::TranscriptMismatch,
            });
        }

        if step.expects_stderr() {
            if run.stderr.is_empty() {
                let _ = output::write_stderr_line(
                    "expected errors on stderr, but the client was silent",
                );
                return Ok(CaseOutcome::Halted {
                    step: index,
                    reason: StepFailure::MissingStderr,
                });
            }
        } else if !run.stderr.is_empty() {
            let _ = output::write_stderr_line(&format!(
                "client printed to stderr:\n{}",
                run.stderr
            ));
            return Ok(CaseOutcome::Halted {
                step: index,
                reason: StepFailure::UnexpectedStderr,
            });
        }
    }
    Ok(CaseOutcome::Passed)
}

/// Builds the client-under-test argument vector for one step.
fn client_args(ctx: &CaseContext<'_>, cache: &CachePath, config: &Path) -> Vec<OsString> {
    vec![
        ctx.testroot.join(config).into_os_string(),
        format!("--cache-file={}", cache.path().display()).into(),
        format!("--cert={}", ctx.cert.display()).into(),
        format!("--key={}", ctx.key.display()).into(),
        OsString::from("--scim-auth-WEAK=true"),
    ]
}

/// Reads the step's expected transcript; no fixture means empty.
fn read_expected(case_dir: &Path, step: &TestStep) -> Result<String, HarnessError> {
    match step.requests_fixture() {
        None => Ok(String::new()),
        Some(relative) => {
            let path = case_dir.join(relative);
            fs::read_to_string(&path).map_err(|err| {
                HarnessError::Fixture(format!(
                    "failed to read requests file {}: {err}",
                    path.display()
                ))
            })
        }
    }
}

/// Writes the expected/received artifact pair and logs the discrepancy.
///
/// Artifact writes are best-effort diagnostics; a write failure must not
/// mask the mismatch itself.
fn write_mismatch_artifacts(ctx: &CaseContext<'_>, step: usize, expected: &str, received: &str) {
    let expected_path = ctx.artifact_dir.join(format!("{}_{step}_expected.txt", ctx.name));
    let received_path = ctx.artifact_dir.join(format!("{}_{step}_received.txt", ctx.name));
    let _ = fs::write(&expected_path, expected);
    let _ = fs::write(&received_path, received);
    let _ = output::write_stderr_line(&format!(
        "received requests do not match expected requests (step {step}); see {} and {}",
        expected_path.display(),
        received_path.display()
    ));
}

// ============================================================================
// SECTION: Cache Path Guard
// ============================================================================

/// Reservation of a unique cache-file name for the client under test.
///
/// Only the name is reserved; the file itself is released immediately so the
/// client starts from a cold cache. Whatever the client leaves behind is
/// removed when the guard drops, however the case exits.
#[derive(Debug)]
struct CachePath {
    /// Reserved cache-file path.
    path: PathBuf,
}

impl CachePath {
    /// Reserves a unique cache-file name.
    fn allocate() -> Result<Self, HarnessError> {
        let file =
            tempfile::Builder::new().prefix("scim-harness-cache.").tempfile().map_err(|err| {
                HarnessError::Client(format!("failed to allocate cache file: {err}"))
            })?;
        let path = file.path().to_path_buf();
        drop(file);
        Ok(Self {
            path,
        })
    }

    /// Returns the reserved path.
    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CachePath {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
