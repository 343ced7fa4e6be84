// crates/scim-harness-cli/src/output.rs
// ============================================================================
// Module: Output Helpers
// Description: Line-oriented stdout/stderr writers for harness diagnostics.
// Purpose: Keep user-facing output behind explicit io::Write calls.
// Dependencies: std::io
// ============================================================================

//! ## Overview
//! All user-facing harness output goes through these helpers: progress lines
//! on stdout, diagnostics on stderr. Diagnostic writes are best-effort; a
//! broken pipe must never mask the condition being reported.

use std::io;
use std::io::Write;
use std::process::ExitCode;

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
///
/// # Errors
///
/// Returns the underlying error when stdout cannot be written.
pub fn write_stdout_line(message: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
///
/// # Errors
///
/// Returns the underlying error when stderr cannot be written.
pub fn write_stderr_line(message: &str) -> io::Result<()> {
    let mut stderr = io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
#[must_use]
pub fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
