// crates/scim-harness-cli/src/main.rs
// ============================================================================
// Module: SCIM Harness Entry Point
// Description: Argument parsing and mode dispatch for the scim-harness binary.
// Purpose: Start the TLS mock server, then run the suite or log standalone.
// Dependencies: clap, scim-harness-core, scim-harness-server, tokio
// ============================================================================

//! ## Overview
//! The `scim-harness` binary wires the pieces together: it spawns the TLS
//! mock server, then either drives the full test suite against the client
//! under test (`--testroot` given) or idles in standalone logging mode,
//! recording every request per resource type until the listener dies.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use scim_harness_cli::HarnessError;
use scim_harness_cli::SuiteConfig;
use scim_harness_cli::output::emit_error;
use scim_harness_cli::run_suite;
use scim_harness_core::FailureInjection;
use scim_harness_core::TranscriptSink;
use scim_harness_server::MockServer;
use scim_harness_server::MockServerConfig;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Default port of the mock SCIM server.
const DEFAULT_PORT: u16 = 8000;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "scim-harness", about = "Scripted integration-test harness for a SCIM client")]
struct Cli {
    /// Path to the mock server's TLS certificate.
    #[arg(long, value_name = "PATH")]
    cert: PathBuf,
    /// Path to the mock server's TLS private key.
    #[arg(long, value_name = "PATH")]
    key: PathBuf,
    /// Root of the test directory, containing scripts/ and tests/; omit to
    /// run in standalone logging mode.
    #[arg(long, value_name = "PATH")]
    testroot: Option<PathBuf>,
    /// Path to the SCIM client binary under test.
    #[arg(long, value_name = "PATH", requires = "testroot")]
    binary: Option<PathBuf>,
    /// Port the mock server listens on.
    #[arg(long, value_name = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments and dispatches to the selected mode.
async fn run() -> Result<ExitCode, HarnessError> {
    let cli = Cli::parse();
    let server_config = MockServerConfig {
        bind: SocketAddr::from(([0, 0, 0, 0], cli.port)),
        cert: cli.cert.clone(),
        key: cli.key.clone(),
    };
    match cli.testroot {
        None => run_standalone(server_config).await,
        Some(testroot) => {
            let binary = cli
                .binary
                .ok_or_else(|| HarnessError::Suite("--binary is required with --testroot".to_string()))?;
            run_suite_mode(server_config, testroot, binary, cli.cert, cli.key).await
        }
    }
}

/// Standalone logging mode: serve forever, one log file per resource type.
async fn run_standalone(config: MockServerConfig) -> Result<ExitCode, HarnessError> {
    let server = MockServer::standalone(config, &PathBuf::from("."))
        .map_err(|err| HarnessError::Server(format!("failed to create log files: {err}")))?;
    let mut handle = server.spawn();
    let error = handle.wait_error().await;
    Err(error.into())
}

/// Suite mode: spawn the shared-sink server and run every discovered case.
async fn run_suite_mode(
    config: MockServerConfig,
    testroot: PathBuf,
    binary: PathBuf,
    cert: PathBuf,
    key: PathBuf,
) -> Result<ExitCode, HarnessError> {
    let sink = TranscriptSink::new();
    let failure = FailureInjection::new();
    let server = MockServer::shared(config, &sink, failure.clone());
    let mut handle = server.spawn();
    let suite = SuiteConfig {
        testroot,
        binary,
        cert,
        key,
        artifact_dir: PathBuf::from("."),
    };
    run_suite(&suite, &sink, &failure, &mut handle).await?;
    Ok(ExitCode::SUCCESS)
}
