// crates/scim-harness-server/tests/common/mod.rs
// ============================================================================
// Module: TLS Test Fixtures
// Description: Generate ephemeral TLS assets for mock-server tests.
// Purpose: Avoid committing private keys while enabling TLS coverage.
// Dependencies: rcgen, tempfile
// ============================================================================

//! Ephemeral certificate authority and server certificate for driving the
//! mock server over TLS in tests.

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
use tempfile::TempDir;

/// Generated TLS material; paths stay valid while the fixture is alive.
pub struct GeneratedTls {
    _tempdir: TempDir,
    pub ca_pem: PathBuf,
    pub server_cert: PathBuf,
    pub server_key: PathBuf,
}

/// Generates a CA plus a loopback server certificate signed by it.
pub fn generate_tls_fixtures() -> Result<GeneratedTls, Box<dyn std::error::Error>> {
    // Both ring (reqwest) and aws-lc-rs (axum-server) are linked; pick one
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
