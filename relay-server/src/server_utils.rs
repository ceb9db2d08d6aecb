use anyhow::Result;
use std::net::{IpAddr, SocketAddr};
use tokio::signal;
use tracing::info;

pub async fn create_listener(host: &str, port: u16) -> Result<tokio::net::TcpListener> {
    let ip: IpAddr =
        host.parse().map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", host, e))?;
    let addr = SocketAddr::new(ip, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🔌 Bound to {}", addr);
    Ok(listener)
}

#[allow(
    clippy::expect_used,
    reason = "Signal handlers are critical infrastructure, panic is appropriate on failure"
)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("🛑 Received Ctrl+C, shutting down..."),
        () = terminate => info!("🛑 Received SIGTERM, shutting down..."),
    }

    info!("⏳ Waiting for in-flight image jobs to finish...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_listener_on_ephemeral_port() {
        let listener = create_listener("127.0.0.1", 0).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_create_listener_rejects_hostname() {
        let err = create_listener("localhost", 0).await.unwrap_err();
        assert!(err.to_string().contains("Invalid bind address"));
    }
}
