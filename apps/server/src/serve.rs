//! Listener setup and graceful shutdown.

use anyhow::{Context, Result, bail};
use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use campus::domain::config::SslConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// In-flight requests get this long to finish after a shutdown signal.
pub(crate) const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Fails fast on missing TLS files instead of at bind time.
pub(crate) fn check_tls_files(ssl: &SslConfig) -> Result<()> {
    for (what, path) in [("certificate", &ssl.cert), ("key", &ssl.key)] {
        if !path.is_file() {
            bail!("SSL {what} not found at: {}", path.display());
        }
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = ssl.key.metadata()?.permissions().mode();
        if mode & 0o077 != 0 {
            warn!(
                key = %ssl.key.display(),
                mode = format_args!("{:o}", mode & 0o777),
                "SSL private key is readable by group or others (should be 600)"
            );
        }
    }
    Ok(())
}

/// Serves `app` on `address` until Ctrl+C or SIGTERM.
pub(crate) async fn serve(address: SocketAddr, ssl: Option<&SslConfig>, app: Router) -> Result<()> {
    let handle = Handle::<SocketAddr>::new();
    tokio::spawn(drain_on_signal(handle.clone()));

    let service = app.into_make_service();
    match ssl {
        Some(ssl) => {
            let tls = RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                .await
                .context("Failed to load SSL/TLS certificates")?;
            info!("Listening on https://{address}");
            axum_server::bind_rustls(address, tls)
                .handle(handle)
                .serve(service)
                .await
                .context("HTTPS server failed")?;
        },
        None => {
            info!("Listening on http://{address}");
            axum_server::bind(address).handle(handle).serve(service).await.context("HTTP server failed")?;
        },
    }

    info!("Server shutdown complete");
    Ok(())
}

async fn drain_on_signal(handle: Handle<SocketAddr>) {
    match shutdown_signal().await {
        Ok(()) => {
            info!(grace_secs = SHUTDOWN_GRACE.as_secs(), "Shutdown signal received, draining connections");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        },
        Err(e) => error!("Error while waiting for shutdown signal: {e}"),
    }
}

async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res,
        res = terminate => res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_tls_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        let ssl = SslConfig { cert: cert.clone(), key: dir.path().join("key.pem") };

        let err = check_tls_files(&ssl).unwrap_err();
        assert!(err.to_string().contains("certificate"), "{err}");

        fs::write(&cert, "cert").unwrap();
        let err = check_tls_files(&ssl).unwrap_err();
        assert!(err.to_string().contains("key not found"), "{err}");

        fs::write(&ssl.key, "key").unwrap();
        check_tls_files(&ssl).unwrap();
    }
}
