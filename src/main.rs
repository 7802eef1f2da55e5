use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use voicelink::{
    create_router, events, AppState, Config, EventBus, EventSource, NatsEventSource,
    SessionHandle,
};
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "voicelink", about = "Voice session console backend")]
struct Args {
    /// Config file path (without extension)
    #[arg(short, long, default_value = "config/voicelink")]
    config: String,

    /// Do not subscribe to NATS; events only arrive through the HTTP API
    #[arg(long)]
    no_nats: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("Voicelink v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Reset policy: {:?}", cfg.session.reset_policy);

    let bus = EventBus::new();
    let session = SessionHandle::new(cfg.session.clone());
    session.attach(&bus);

    let mut source = None;
    let mut outbound = None;
    if cfg.nats.enabled && !args.no_nats {
        let mut nats = NatsEventSource::new(cfg.nats.clone());
        match nats.start().await {
            Ok(receiver) => {
                tokio::spawn(events::pump(receiver, bus.clone()));
                if let Some(sink) = nats.message_sink() {
                    info!("Client messages go to {}", sink.subject());
                    outbound = Some(sink);
                }
                source = Some(nats);
            }
            Err(e) => {
                warn!("NATS unavailable, continuing with HTTP ingestion only: {:#}", e);
            }
        }
    }

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    let mut state = AppState::new(session, bus);
    if let Some(sink) = outbound {
        state = state.with_outbound(Arc::new(sink));
    }
    let app = create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await
        .context("HTTP server failed")?;

    if let Some(mut source) = source {
        source.stop().await?;
    }

    info!("Shut down");
    Ok(())
}
