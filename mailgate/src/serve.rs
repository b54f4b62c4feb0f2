use std::net::{IpAddr, SocketAddr};

use axum::Router;
use if_addrs::get_if_addrs;
use tokio::net::{TcpListener, ToSocketAddrs};

/// Bind `addr` and serve `router` until Ctrl+C or SIGTERM.
pub async fn serve<A: ToSocketAddrs>(addr: A, router: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log_listener_urls(&listener);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn log_listener_urls(listener: &TcpListener) {
    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(err) => {
            tracing::warn!(%err, "could not determine the listening address");
            return;
        }
    };

    let port = addr.port();
    tracing::info!(port, "listening");
    if addr.ip().is_unspecified() {
        for ip in interface_ips(matches!(addr, SocketAddr::V6(_))) {
            log_url(ip, port);
        }
    } else {
        log_url(addr.ip(), port);
    }
}

fn interface_ips(ipv6: bool) -> Vec<IpAddr> {
    get_if_addrs()
        .into_iter()
        .flatten()
        .map(|iface| iface.ip())
        .filter(|ip| ip.is_ipv6() == ipv6)
        .collect()
}

fn log_url(ip: IpAddr, port: u16) {
    match ip {
        _ if ip.is_loopback() => tracing::info!("➜  Local:   http://localhost:{port}"),
        IpAddr::V4(_) => tracing::info!("➜  Network: http://{ip}:{port}"),
        IpAddr::V6(_) => tracing::info!("➜  Network: http://[{ip}]:{port}"),
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}
