//! Bridge server entry point.
//!
//! Binds a TCP socket and dispatches JSON rigging commands against an
//! in-memory scene. One full JSON object per request, one back.
//!
//! # Usage
//!
//! ```bash
//! rigbridge-server --scene character.json
//! rigbridge-server --port 9876 --disable export
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rigbridge_core::{Capability, ServerConfig};
use rigbridge_scene::MemoryScene;
use rigbridge_server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Bridge server dispatching JSON rigging commands to a scene.
#[derive(Parser, Debug)]
#[command(name = "rigbridge-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Interface to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// TCP port to listen on.
    #[arg(long, short, default_value_t = 9876)]
    port: u16,

    /// JSON scene description to load at startup. Starts with an empty
    /// scene when omitted.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Disable a capability group (repeatable): `scene_inspection`,
    /// `rigging`, `export`.
    #[arg(long = "disable", value_name = "CAPABILITY")]
    disabled: Vec<Capability>,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,rigbridge_server=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = ServerConfig {
        bind_host: args.host,
        bind_port: args.port,
        scene_path: args.scene,
        ..ServerConfig::default()
    };
    for capability in &args.disabled {
        config.capabilities.disable(*capability);
    }

    let scene = match &config.scene_path {
        Some(path) => MemoryScene::from_json_file(path)
            .with_context(|| format!("failed to load scene from {}", path.display()))?,
        None => MemoryScene::new("Scene"),
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.bind_addr(),
        "starting rigbridge-server"
    );

    let server = Server::new(&config);
    tokio::select! {
        result = server.run(scene) => result.context("server failed")?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested");
        }
    }

    Ok(())
}
