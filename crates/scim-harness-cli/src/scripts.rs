// crates/scim-harness-cli/src/scripts.rs
// ============================================================================
// Module: Collaborator Scripts
// Description: Subprocess invocation of backing-service scripts and the
//              client under test.
// Purpose: Judge collaborators by exit status; capture the client's stderr.
// Dependencies: tokio::process
// ============================================================================

//! ## Overview
//! The backing directory service is managed through four external scripts
//! under `<testroot>/scripts` (`reset_ldap`, `apply_scenario`,
//! `start_test_ldap`, `ldap_isup`), each judged only by its exit status. The
//! client under test is a fifth external process whose stderr is captured in
//! full; its stdout is ignored. No invocation carries a timeout: a hanging
//! collaborator hangs the suite, an accepted harness limitation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use tokio::process::Command;

use crate::error::HarnessError;

// ============================================================================
// SECTION: Script Invocation
// ============================================================================

/// Directory of collaborator scripts under the test root.
pub const SCRIPTS_DIR: &str = "scripts";

/// Resolves a collaborator script path under the test root.
#[must_use]
pub fn script_path(testroot: &Path, name: &str) -> PathBuf {
    testroot.join(SCRIPTS_DIR).join(name)
}

/// Runs a collaborator script to completion, inheriting the harness's
/// standard streams.
///
/// # Errors
///
/// Returns [`HarnessError::Script`] when the script cannot be spawned or
/// exits non-zero; both are fatal to the run.
pub async fn run_script(path: &Path, args: &[&str]) -> Result<(), HarnessError> {
    let status = Command::new(path).args(args).status().await.map_err(|err| {
        HarnessError::Script(format!("failed to run {}: {err}", path.display()))
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(HarnessError::Script(format!("{} exited with {status}", path.display())))
    }
}

/// Runs a readiness probe script; any failure to spawn or non-zero exit
/// counts as "not ready".
pub async fn probe_script(path: &Path) -> bool {
    Command::new(path).status().await.is_ok_and(|status| status.success())
}

// ============================================================================
// SECTION: Client Invocation
// ============================================================================

/// Captured result of one client-under-test run.
#[derive(Debug)]
pub struct ClientRun {
    /// Everything the client wrote to stderr, captured in full.
    pub stderr: String,
}

/// Runs the client under test to completion, capturing its output.
///
/// The harness expects the client to complete even when it reports
/// protocol-level errors on stderr; a crash is a harness defect, not a test
/// outcome.
///
/// # Errors
///
/// Returns [`HarnessError::Client`] when the client cannot be spawned or
/// exits non-zero; both are fatal to the run.
pub async fn run_client(binary: &Path, args: &[OsString]) -> Result<ClientRun, HarnessError> {
    let output = Command::new(binary).args(args).output().await.map_err(|err| {
        HarnessError::Client(format!("failed to run {}: {err}", binary.display()))
    })?;
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
        return Err(HarnessError::Client(format!(
            "{} exited with {}: {}",
            binary.display(),
            output.status,
            stderr.trim()
        )));
    }
    Ok(ClientRun {
        stderr,
    })
}
