use radio_core::{
    AudioFormat, DisplayBoard, PlayerError, Selection, Station, StationEvent, StationPlayer,
    StationState, StreamFactory, StreamHandle, StreamStatus,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared view of every handle the factory has built.
#[derive(Default)]
struct Recorder {
    created: Vec<(u64, String, Vec<AudioFormat>)>,
    /// Handles that ignore `play` when asked whether they are playing.
    stuck: bool,
    fail_next: Option<String>,
}

struct FakeHandle {
    id: u64,
    status: StreamStatus,
    stopped: Rc<RefCell<Vec<u64>>>,
    stuck: bool,
}

impl StreamHandle for FakeHandle {
    fn play(&mut self) {
        if !matches!(self.status, StreamStatus::Failed(_)) {
            self.status = StreamStatus::Playing;
        }
    }

    fn stop(&mut self) {
        self.status = StreamStatus::Idle;
        self.stopped.borrow_mut().push(self.id);
    }

    fn status(&mut self) -> StreamStatus {
        if self.stuck {
            StreamStatus::Idle
        } else {
            self.status.clone()
        }
    }
}

struct FakeFactory {
    next_id: u64,
    recorder: Rc<RefCell<Recorder>>,
    stopped: Rc<RefCell<Vec<u64>>>,
}

impl StreamFactory for FakeFactory {
    type Handle = FakeHandle;

    fn create(&mut self, uri: &str, formats: &[AudioFormat]) -> FakeHandle {
        self.next_id += 1;
        let mut rec = self.recorder.borrow_mut();
        rec.created
            .push((self.next_id, uri.to_string(), formats.to_vec()));
        let status = match rec.fail_next.take() {
            Some(reason) => StreamStatus::Failed(reason),
            None => StreamStatus::Idle,
        };
        FakeHandle {
            id: self.next_id,
            status,
            stopped: Rc::clone(&self.stopped),
            stuck: rec.stuck,
        }
    }
}

struct Harness {
    player: StationPlayer<FakeFactory, DisplayBoard>,
    recorder: Rc<RefCell<Recorder>>,
    stopped: Rc<RefCell<Vec<u64>>>,
}

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;

fn harness() -> Harness {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let stopped = Rc::new(RefCell::new(Vec::new()));
    let stations = vec![
        Station::new("A", "http://a.example.invalid/stream"),
        Station::new("B", "http://b.example.invalid/stream"),
        Station::new("C", "http://c.example.invalid/stream"),
    ];
    let factory = FakeFactory {
        next_id: 0,
        recorder: Rc::clone(&recorder),
        stopped: Rc::clone(&stopped),
    };
    let player = StationPlayer::new(
        stations,
        factory,
        DisplayBoard::new(3),
        AudioFormat::DEFAULT_PREFERENCE.to_vec(),
    );
    Harness {
        player,
        recorder,
        stopped,
    }
}

fn lit(h: &Harness, index: usize) -> bool {
    h.player.display().get(index).map(|i| i.is_on()).unwrap_or(false)
}

#[test]
fn play_then_stop_leaves_nothing_playing() {
    for i in [A, B, C] {
        let mut h = harness();
        h.player.play(Some(i)).unwrap();
        assert_eq!(h.player.playing_count(), 1);
        h.player.stop();
        assert_eq!(h.player.playing_count(), 0);
        assert!(!lit(&h, i));
        assert!(h.player.handle(i).is_none());
    }
}

#[test]
fn handle_created_with_uri_and_format_preference() {
    let mut h = harness();
    h.player.play(Some(B)).unwrap();
    let rec = h.recorder.borrow();
    assert_eq!(rec.created.len(), 1);
    assert_eq!(rec.created[0].1, "http://b.example.invalid/stream");
    assert_eq!(
        rec.created[0].2,
        vec![AudioFormat::Mp3, AudioFormat::Aac, AudioFormat::Aacp]
    );
}

#[test]
fn double_play_reuses_handle_without_stopping() {
    let mut h = harness();
    h.player.play(Some(A)).unwrap();
    let first = h.player.handle(A).map(|x| x.id);
    h.player.play(Some(A)).unwrap();

    assert_eq!(h.player.handle(A).map(|x| x.id), first);
    assert_eq!(h.player.active_index(), A);
    assert!(lit(&h, A));
    assert!(h.stopped.borrow().is_empty());
    assert_eq!(h.recorder.borrow().created.len(), 1);
}

#[test]
fn play_without_stop_can_run_two_streams() {
    let mut h = harness();
    h.player.play(Some(A)).unwrap();
    h.player.play(Some(B)).unwrap();
    assert_eq!(h.player.playing_count(), 2);
    assert_eq!(h.player.active_index(), B);
}

#[test]
fn stop_discards_handle_so_next_play_builds_a_new_one() {
    let mut h = harness();
    h.player.play(Some(C)).unwrap();
    let before = h.player.handle(C).map(|x| x.id).unwrap();
    h.player.stop();
    h.player.play(Some(C)).unwrap();
    let after = h.player.handle(C).map(|x| x.id).unwrap();

    assert_ne!(before, after);
    assert_eq!(*h.stopped.borrow(), vec![before]);
}

#[test]
fn click_scenario_a_b_b() {
    let mut h = harness();

    assert_eq!(h.player.select(A).unwrap(), Selection::Started(A));
    assert_eq!(h.player.state(A), StationState::Playing);
    assert!(lit(&h, A));

    assert_eq!(h.player.select(B).unwrap(), Selection::Started(B));
    assert_eq!(h.player.state(A), StationState::Stopped);
    assert!(!lit(&h, A));
    assert_eq!(h.player.state(B), StationState::Playing);
    assert!(lit(&h, B));

    assert_eq!(h.player.select(B).unwrap(), Selection::Stopped(B));
    assert_eq!(h.player.state(B), StationState::Stopped);
    assert!(!lit(&h, B));
    assert_eq!(h.player.playing_count(), 0);
    assert_eq!(h.player.display().now_playing(), None);
}

#[test]
fn click_with_stuck_playing_check_restarts_station() {
    let mut h = harness();
    h.recorder.borrow_mut().stuck = true;

    h.player.select(A).unwrap();
    let first = h.player.handle(A).map(|x| x.id).unwrap();

    assert_eq!(h.player.select(A).unwrap(), Selection::Started(A));
    let second = h.player.handle(A).map(|x| x.id).unwrap();

    assert_ne!(first, second);
    assert!(lit(&h, A));
    assert_eq!(*h.stopped.borrow(), vec![first]);
}

#[test]
fn out_of_range_changes_nothing() {
    let mut h = harness();
    h.player.select(B).unwrap();

    assert_eq!(
        h.player.play(Some(7)),
        Err(PlayerError::InvalidIndex { index: 7, len: 3 })
    );
    assert_eq!(
        h.player.select(3),
        Err(PlayerError::InvalidIndex { index: 3, len: 3 })
    );
    assert_eq!(h.player.active_index(), B);
    assert_eq!(h.player.state(B), StationState::Playing);
    assert!(lit(&h, B));
}

#[test]
fn failed_stream_is_reported_once_and_can_be_retried() {
    let mut h = harness();
    h.recorder.borrow_mut().fail_next = Some("connection refused".to_string());

    h.player.select(C).unwrap();
    assert_eq!(h.player.state(C), StationState::Failed);

    assert_eq!(
        h.player.refresh(),
        Some(StationEvent::Failed {
            index: C,
            reason: "connection refused".to_string()
        })
    );
    assert!(!lit(&h, C));
    assert_eq!(h.player.refresh(), None);

    assert_eq!(h.player.select(C).unwrap(), Selection::Started(C));
    assert_eq!(h.player.state(C), StationState::Playing);
    assert!(lit(&h, C));
    assert_eq!(h.recorder.borrow().created.len(), 2);
}

#[test]
fn refresh_is_quiet_while_streams_are_healthy() {
    let mut h = harness();
    assert_eq!(h.player.refresh(), None);
    h.player.select(A).unwrap();
    assert_eq!(h.player.refresh(), None);
    assert!(lit(&h, A));
}
