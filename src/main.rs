use anyhow::Context;

use connect_pulse::config::{AppConfig, DirectoryBackend};
use connect_pulse::directory;
use connect_pulse::server::{self, AppState};
use connect_pulse::wizard::manager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let directory = directory::from_config(&config).context("could not build directory")?;

    eprintln!("🤝 ConnectPulse v{}", env!("CARGO_PKG_VERSION"));
    match config.backend {
        DirectoryBackend::Memory => eprintln!("   Directory: built-in fixtures"),
        DirectoryBackend::Supabase => {
            if let Some(supabase) = &config.supabase {
                eprintln!("   Directory: {}", supabase.url);
            }
        }
    }
    eprintln!("   API: http://0.0.0.0:{}/api", config.port);

    let state = AppState::new(directory, config.request_timeout);
    let rooms = state.open_group_rooms().await;
    eprintln!("   Chat rooms: {}", rooms);
    eprintln!("   Idle sessions expire after {}s\n", config.session_idle.as_secs());

    manager::spawn_expiry_loop(state.wizard.clone(), config.session_idle);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, backend = ?config.backend, "ConnectPulse server started");

    axum::serve(listener, server::app(state))
        .await
        .context("server error")?;
    Ok(())
}
