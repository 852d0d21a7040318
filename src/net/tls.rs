//! TLS configuration and certificate loading.

use std::fs::File;
use std::io::{BufReader, Error, ErrorKind};
use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

/// Load TLS configuration from certificate and key files.
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, Error> {
    check_pem(cert_path, key_path)?;
    RustlsConfig::from_pem_file(cert_path, key_path).await
}

/// Fail early with a readable message when the PEM files are missing or empty.
fn check_pem(cert_path: &Path, key_path: &Path) -> Result<(), Error> {
    let mut certs = BufReader::new(open(cert_path, "Certificate")?);
    let found = rustls_pemfile::certs(&mut certs).collect::<Result<Vec<_>, _>>()?;
    if found.is_empty() {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("No certificates found in {:?}", cert_path),
        ));
    }

    let mut key = BufReader::new(open(key_path, "Private key")?);
    if rustls_pemfile::private_key(&mut key)?.is_none() {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("No private key found in {:?}", key_path),
        ));
    }
    Ok(())
}

fn open(path: &Path, what: &str) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        Error::new(e.kind(), format!("{} file {:?} unreadable: {}", what, path, e))
    })
}
