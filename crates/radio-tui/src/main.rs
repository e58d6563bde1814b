mod action;
mod app;
mod components;
mod mpv;
mod theme;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use radio_core::config::Config;
use radio_core::{platform, station, DisplayBoard, StationPlayer};

#[derive(Debug, Parser)]
#[command(name = "radio", about = "Terminal internet radio player")]
struct Args {
    /// Config file (default: ~/.config/radio/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Station list, TOML (`[[station]]` tables) or .m3u.
    #[arg(long)]
    stations: Option<PathBuf>,

    /// Playback volume, 0.0 to 1.0.
    #[arg(long)]
    volume: Option<f32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("radio.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,radio_core=debug,radio_tui=debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("radio log: {}", log_path.display());
    tracing::info!("radio starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("config load failed, using defaults: {}", e);
            Config::default()
        }),
    };

    // ── Stations ─────────────────────────────────────────────────────────────
    let stations = match &args.stations {
        Some(path) if path.extension().is_some_and(|ext| ext == "m3u") => {
            station::load_stations_from_m3u(path)?
        }
        Some(path) => station::load_stations_from_toml(path)?,
        None => station::load_stations(
            &config.stations.stations_toml,
            config.stations.m3u_path.as_deref(),
        )?,
    };
    if stations.is_empty() {
        anyhow::bail!("station list is empty");
    }

    // ── Player ───────────────────────────────────────────────────────────────
    let volume = args
        .volume
        .unwrap_or(config.playback.default_volume)
        .clamp(0.0, 1.0);
    let mpv_binary = platform::find_mpv_binary();
    tracing::info!("mpv binary: {:?}", mpv_binary);

    let board = DisplayBoard::new(stations.len());
    let factory = mpv::MpvFactory::new(mpv_binary, volume);
    let player = StationPlayer::new(stations, factory, board, config.playback.formats.clone());

    // ── Run TUI ──────────────────────────────────────────────────────────────
    app::App::new(player).run().await?;

    tracing::info!("radio exiting");
    Ok(())
}
