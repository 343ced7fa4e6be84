// crates/scim-harness-cli/tests/common/mod.rs
// ============================================================================
// Module: Harness Test Fixtures
// Description: TLS assets and a spawned mock server for orchestrator tests.
// Purpose: Give run_case a live server handle without a real SCIM client.
// Dependencies: rcgen, tempfile, scim-harness-server
// ============================================================================

//! Ephemeral TLS material plus a live mock server whose error channel the
//! orchestrator can poll. The fake client scripts in these tests never dial
//! the server; it only needs to be healthy.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

use std::fs;
use std::path::PathBuf;

use rcgen::BasicConstraints;
use rcgen::Certificate;
use rcgen::CertificateParams;
use rcgen::DistinguishedName;
use rcgen::DnType;
use rcgen::IsCa;
use rcgen::Issuer;
use rcgen::KeyPair;
use scim_harness_core::FailureInjection;
use scim_harness_core::TranscriptSink;
use scim_harness_server::MockServer;
use scim_harness_server::MockServerConfig;
use scim_harness_server::MockServerHandle;
use tempfile::TempDir;

/// Generated TLS material; paths stay valid while the fixture is alive.
pub struct GeneratedTls {
    _tempdir: TempDir,
    pub ca_pem: PathBuf,
    pub server_cert: PathBuf,
    pub server_key: PathBuf,
}

/// A healthy spawned mock server plus the state shared with it.
pub struct IdleServer {
    pub tls: GeneratedTls,
    pub handle: MockServerHandle,
    pub sink: TranscriptSink,
    pub failure: FailureInjection,
}

/// Spawns a shared-sink mock server on an ephemeral loopback port.
pub async fn spawn_idle_server() -> Result<IdleServer, Box<dyn std::error::Error>> {
    let tls = generate_tls_fixtures()?;
    let sink = TranscriptSink::new();
    let failure = FailureInjection::new();
    let config = MockServerConfig {
        bind: "127.0.0.1:0".parse()?,
        cert: tls.server_cert.clone(),
        key: tls.server_key.clone(),
    };
    let mut handle = MockServer::shared(config, &sink, failure.clone()).spawn();
    if handle.local_addr().await.is_none() {
        let error = handle.try_error().map_or_else(String::new, |err| err.to_string());
        return Err(format!("mock server failed to start: {error}").into());
    }
    Ok(IdleServer {
        tls,
        handle,
        sink,
        failure,
    })
}

/// Generates a CA plus a loopback server certificate signed by it.
pub fn generate_tls_fixtures() -> Result<GeneratedTls, Box<dyn std::error::Error>> {
    // Multiple rustls providers may be linked into the test binary; pick one
    // process-wide default before anyone builds a rustls config.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    let tempdir = tempfile::Builder::new().prefix("scim-harness-tls").tempdir()?;
    let (ca, issuer) = generate_ca()?;
    let (server, server_key_pair) = generate_server_cert(&issuer)?;

    let ca_pem = tempdir.path().join("ca.pem");
    let server_cert = tempdir.path().join("server.pem");
    let server_key = tempdir.path().join("server.key");

    fs::write(&ca_pem, ca.pem())?;
    fs::write(&server_cert, server.pem())?;
    fs::write(&server_key, server_key_pair.serialize_pem())?;

    Ok(GeneratedTls {
        _tempdir: tempdir,
        ca_pem,
        server_cert,
        server_key,
    })
}

fn generate_ca() -> Result<(Certificate, Issuer<'static, KeyPair>), Box<dyn std::error::Error>> {
    let key = KeyPair::generate()?;
    let mut params = CertificateParams::default();
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.distinguished_name = distinguished_name("SCIM Harness Test CA");
    let cert = params.self_signed(&key)?;
    let issuer = Issuer::new(params, key);
    Ok((cert, issuer))
}

fn generate_server_cert(
    issuer: &Issuer<'_, KeyPair>,
) -> Result<(Certificate, KeyPair), Box<dyn std::error::Error>> {
    let key = KeyPair::generate()?;
    let mut params =
        CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()])?;
    params.distinguished_name = distinguished_name("SCIM Harness Test Server");
    params.is_ca = IsCa::NoCa;
    let cert = params.signed_by(&key, issuer)?;
    Ok((cert, key))
}

fn distinguished_name(common_name: &str) -> DistinguishedName {
    let mut name = DistinguishedName::new();
    name.push(DnType::CommonName, common_name);
    name
}
