//! mpv-backed stream handles.
//!
//! Each playing station gets its own `mpv --no-video` child. `play` spawns it,
//! `stop` kills it, and `status` polls whether it is still alive. All of it is
//! non-blocking so the player can treat it as fire-and-forget.

use std::path::PathBuf;
use std::process::Stdio;

use radio_core::{AudioFormat, StreamFactory, StreamHandle, StreamStatus};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Build the mpv command line for one stream.
pub fn mpv_args(uri: &str, formats: &[AudioFormat], volume: f32) -> Vec<String> {
    let mut decoders: Vec<&str> = Vec::new();
    for f in formats {
        if !decoders.contains(&f.decoder()) {
            decoders.push(f.decoder());
        }
    }

    let mut args = vec![
        "--no-video".to_string(),
        "--quiet".to_string(),
        "--no-terminal".to_string(),
        format!(
            "--volume={}",
            (volume * 100.0).clamp(0.0, 100.0).round() as i64
        ),
    ];
    if !decoders.is_empty() {
        args.push(format!("--ad={}", decoders.join(",")));
    }
    args.push(uri.to_string());
    args
}

pub struct MpvFactory {
    binary: Option<PathBuf>,
    volume: f32,
}

impl MpvFactory {
    pub fn new(binary: Option<PathBuf>, volume: f32) -> Self {
        if binary.is_none() {
            warn!("mpv binary not found; every stream will fail to start");
        }
        Self { binary, volume }
    }
}

impl StreamFactory for MpvFactory {
    type Handle = MpvStream;

    fn create(&mut self, uri: &str, formats: &[AudioFormat]) -> MpvStream {
        MpvStream {
            binary: self.binary.clone(),
            args: mpv_args(uri, formats, self.volume),
            child: None,
            status: StreamStatus::Idle,
        }
    }
}

pub struct MpvStream {
    binary: Option<PathBuf>,
    args: Vec<String>,
    child: Option<Child>,
    status: StreamStatus,
}

impl MpvStream {
    fn spawn(&self) -> anyhow::Result<Child> {
        let binary = self
            .binary
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("mpv binary not found"))?;
        let child = Command::new(binary)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        Ok(child)
    }
}

impl StreamHandle for MpvStream {
    fn play(&mut self) {
        if self.status() == StreamStatus::Playing {
            debug!("mpv: already running");
            return;
        }
        match self.spawn() {
            Ok(child) => {
                info!(pid = ?child.id(), "mpv: spawned");
                self.child = Some(child);
                self.status = StreamStatus::Playing;
            }
            Err(e) => {
                warn!("mpv: spawn failed: {}", e);
                self.status = StreamStatus::Failed(e.to_string());
            }
        }
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                debug!("mpv: kill failed: {}", e);
            }
        }
        self.status = StreamStatus::Idle;
    }

    fn status(&mut self) -> StreamStatus {
        if let Some(child) = self.child.as_mut() {
            match child.try_wait() {
                Ok(None) => {}
                Ok(Some(exit)) => {
                    self.child = None;
                    self.status = StreamStatus::Failed(format!("mpv exited with {}", exit));
                }
                Err(e) => {
                    self.child = None;
                    self.status = StreamStatus::Failed(format!("mpv wait failed: {}", e));
                }
            }
        }
        self.status.clone()
    }
}
