use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use radio_core::{
    DisplayBoard, PlayerError, Selection, StationEvent, StationPlayer, StreamFactory,
};

use crate::action::{map_key, Action};
use crate::components::station_list::StationList;
use crate::widgets::status_bar;

/// Animation + stream health tick.
const TICK: Duration = Duration::from_millis(250);
/// How long the key reader waits for input before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Forward terminal events to `tx` until `quit` is set or the receiver is gone.
/// `next` returns `Ok(None)` when nothing arrived within the timeout.
fn pump_events(
    tx: &mpsc::Sender<Event>,
    quit: &AtomicBool,
    mut next: impl FnMut(Duration) -> io::Result<Option<Event>>,
) {
    while !quit.load(Ordering::Relaxed) {
        match next(INPUT_POLL) {
            Ok(Some(ev)) => {
                if tx.blocking_send(ev).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("input: {}", e);
                break;
            }
        }
    }
}

fn poll_terminal(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

pub struct App<F: StreamFactory> {
    player: StationPlayer<F, DisplayBoard>,
    station_list: StationList,
    /// Last status message and whether it is an error.
    last_log: Option<(String, bool)>,
    show_keys: bool,
    tick: usize,
    should_quit: bool,
}

impl<F: StreamFactory> App<F> {
    pub fn new(player: StationPlayer<F, DisplayBoard>) -> Self {
        let station_list = StationList::new(player.len());
        Self {
            player,
            station_list,
            last_log: None,
            show_keys: true,
            tick: 0,
            should_quit: false,
        }
    }

    fn push_log(&mut self, msg: String, is_error: bool) {
        let stamped = format!("{} {}", chrono::Local::now().format("%H:%M:%S"), msg);
        self.last_log = Some((stamped, is_error));
    }

    fn report(&mut self, result: Result<Selection, PlayerError>) {
        match result {
            Ok(Selection::Started(i)) => {
                let name = self.station_name(i);
                self.station_list.select_index(i);
                self.push_log(format!("playing {}", name), false);
            }
            Ok(Selection::Stopped(i)) => {
                let name = self.station_name(i);
                self.push_log(format!("stopped {}", name), false);
            }
            Err(e) => {
                warn!("player: {}", e);
                self.push_log(e.to_string(), true);
            }
        }
    }

    fn station_name(&self, index: usize) -> String {
        self.player
            .station(index)
            .map(|s| s.display_name())
            .unwrap_or_default()
    }

    pub fn handle_action(&mut self, action: Action) {
        debug!(?action, "action");
        match action {
            Action::Select => {
                if let Some(i) = self.station_list.cursor() {
                    let result = self.player.select(i);
                    self.report(result);
                }
            }
            Action::Stop => {
                let i = self.player.active_index();
                self.player.stop();
                self.report(Ok(Selection::Stopped(i)));
            }
            Action::Resume => {
                let i = self.player.active_index();
                self.player.stop();
                let result = self.player.play(None).map(|_| Selection::Started(i));
                self.report(result);
            }
            Action::Next => {
                let result = self.player.select_next();
                self.report(result);
            }
            Action::Prev => {
                let result = self.player.select_prev();
                self.report(result);
            }
            Action::Random => {
                let result = self.player.select_random();
                self.report(result);
            }
            Action::CursorUp => self.station_list.move_by(-1),
            Action::CursorDown => self.station_list.move_by(1),
            Action::CursorFirst => self.station_list.select_first(),
            Action::CursorLast => self.station_list.select_last(),
            Action::JumpToCurrent => self.station_list.select_index(self.player.active_index()),
            Action::ToggleKeys => self.show_keys = !self.show_keys,
            Action::Quit => self.should_quit = true,
        }
    }

    /// Periodic tick: advance the animation and surface stream failures.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if let Some(StationEvent::Failed { index, reason }) = self.player.refresh() {
            let name = self.station_name(index);
            self.push_log(format!("{}: {}", name, reason), true);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let keys_height = if self.show_keys { 1 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(keys_height),
            ])
            .split(frame.area());

        let now_playing = self
            .player
            .display()
            .now_playing()
            .map(|i| self.station_name(i));
        status_bar::draw_now_playing(frame, chunks[0], now_playing.as_deref());

        self.station_list.draw(
            frame,
            chunks[1],
            self.player.stations(),
            self.player.display(),
            self.tick,
        );

        status_bar::draw_log_bar(frame, chunks[2], self.last_log.as_ref());
        if self.show_keys {
            status_bar::draw_keys_bar(frame, chunks[3]);
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        // Stop the stream before the terminal is handed back.
        self.player.stop();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        if let Err(ref e) = result {
            error!("event loop exited with error: {}", e);
        }
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        // ── Background task: keyboard events ──────────────────────────────────
        let quit = Arc::new(AtomicBool::new(false));
        let reader_quit = Arc::clone(&quit);
        let reader =
            tokio::task::spawn_blocking(move || pump_events(&tx, &reader_quit, poll_terminal));

        let mut ticker = tokio::time::interval(TICK);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("{} stations loaded", self.player.len());
        self.push_log(format!("{} stations", self.player.len()), false);

        let result: anyhow::Result<()> = loop {
            if let Err(e) = terminal.draw(|f| self.draw(f)) {
                break Err(e.into());
            }

            if self.should_quit {
                break Ok(());
            }

            tokio::select! {
                ev = rx.recv() => match ev {
                    Some(Event::Key(key)) => {
                        if let Some(action) = map_key(key) {
                            self.handle_action(action);
                        }
                    }
                    Some(_) => {}
                    None => break Ok(()),
                },
                _ = ticker.tick() => self.on_tick(),
            }
        };

        // The reader must finish before the runtime shuts down.
        quit.store(true, Ordering::Relaxed);
        drop(rx);
        if let Err(e) = reader.await {
            warn!("input reader task: {}", e);
        }
        result
    }
}
