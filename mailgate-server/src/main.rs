use std::net::SocketAddr;

use anyhow::Context as _;
use mailgate::{api_router, AppState, Settings, SmtpMailer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Refuse to start without sender credentials
    let settings = Settings::load().context("could not load settings")?;
    tracing::debug!(?settings, "settings loaded");

    let mailer = SmtpMailer::new(&settings).context("could not configure the SMTP relay")?;
    tracing::info!(
        relay = %settings.smtp_host,
        port = settings.smtp_port,
        sender = %mailer.sender(),
        "mail relay configured"
    );

    let routes = api_router(AppState::new(mailer));
    let addr = SocketAddr::new(settings.bind_address, settings.port);
    mailgate::serve(addr, routes)
        .await
        .context("error running HTTP server")?;
    Ok(())
}
