use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::{sleep, Duration};

use vibegraph::feed::{ConnectionState, FeedConsumer, FeedEvent, FeedStream, FeedTransport};
use vibegraph::overlay::{Overlay, SharedOverlay};
use vibegraph::render::{ChartSurface, CursorOverlay};

// ---------------------------------------------------------------------------
// test doubles

#[derive(Default)]
struct SurfaceState {
    series: HashMap<usize, Vec<(f64, f64)>>,
    redraws: usize,
}

#[derive(Clone)]
struct Recorder(Arc<Mutex<SurfaceState>>);

struct MockSurface {
    recorder: Recorder,
}

impl ChartSurface for MockSurface {
    fn slot_count(&self) -> usize {
        8
    }

    fn set_series(&mut self, slot: usize, _label: &str, _color: &'static str, points: &[(f64, f64)]) {
        self.recorder
            .0
            .lock()
            .unwrap()
            .series
            .insert(slot, points.to_vec());
    }

    fn clear_series(&mut self, slot: usize) {
        self.recorder.0.lock().unwrap().series.remove(&slot);
    }

    fn set_window(&mut self, _start: f64, _end: f64) {}

    fn value_to_y(&self, value: f64) -> f64 {
        1.0 - value
    }

    fn set_cursor(&mut self, _cursor: Option<&CursorOverlay>) {}

    fn redraw(&mut self) {
        self.recorder.0.lock().unwrap().redraws += 1;
    }
}

fn shared_overlay() -> (SharedOverlay, Recorder) {
    let recorder = Recorder(Arc::new(Mutex::new(SurfaceState::default())));
    let overlay = Overlay::shared(Box::new(MockSurface {
        recorder: recorder.clone(),
    }));
    (overlay, recorder)
}

/// Never connects; for tests that drive dispatch directly
struct NullTransport;

#[async_trait]
impl FeedTransport for NullTransport {
    async fn connect(&mut self) -> Result<Box<dyn FeedStream>> {
        anyhow::bail!("transport not used in this test")
    }
}

/// Delivers a scripted message sequence, then stays open forever
struct ScriptedTransport {
    messages: Vec<String>,
}

struct ScriptedStream {
    messages: std::vec::IntoIter<String>,
}

#[async_trait]
impl FeedTransport for ScriptedTransport {
    async fn connect(&mut self) -> Result<Box<dyn FeedStream>> {
        Ok(Box::new(ScriptedStream {
            messages: std::mem::take(&mut self.messages).into_iter(),
        }))
    }
}

#[async_trait]
impl FeedStream for ScriptedStream {
    async fn next_message(&mut self) -> Result<Option<String>> {
        match self.messages.next() {
            Some(message) => Ok(Some(message)),
            None => std::future::pending().await,
        }
    }
}

/// Always fails to connect, counting the attempts
struct FailingTransport {
    attempts: Arc<Mutex<usize>>,
}

#[async_trait]
impl FeedTransport for FailingTransport {
    async fn connect(&mut self) -> Result<Box<dyn FeedStream>> {
        *self.attempts.lock().unwrap() += 1;
        anyhow::bail!("connection refused")
    }
}

fn parse(raw: &str) -> FeedEvent {
    FeedEvent::parse(raw).unwrap()
}

// ---------------------------------------------------------------------------
// dispatch

#[tokio::test]
async fn test_dispatch_updates_engine_and_redraws() {
    let (overlay, recorder) = shared_overlay();
    let mut consumer = FeedConsumer::new(NullTransport, overlay.clone());

    consumer.dispatch(parse(
        r#"{"type": "update-devices", "devices": [{"name": "X"}]}"#,
    ));
    assert_eq!(recorder.0.lock().unwrap().redraws, 1);

    consumer.dispatch(parse(
        r#"{"type": "set-group", "group": {"username": "alice", "frames": [
            {"duration": 1000, "value": 1.0, "mode": "OVERRIDE", "targets": []}
        ]}}"#,
    ));

    let engine_total = overlay.lock().unwrap().engine.clock().total();
    assert_eq!(engine_total, 1_000.0);

    let state = recorder.0.lock().unwrap();
    assert_eq!(state.redraws, 2);
    assert_eq!(state.series[&0].len(), 2);
    drop(state);

    assert!(consumer.animating());
}

#[tokio::test]
async fn test_ping_and_unknown_kinds_do_nothing() {
    let (overlay, recorder) = shared_overlay();
    let mut consumer = FeedConsumer::new(NullTransport, overlay);

    consumer.dispatch(parse(r#"{"type": "ping"}"#));
    consumer.dispatch(parse(r#"{"type": "comets-incoming"}"#));

    assert_eq!(recorder.0.lock().unwrap().redraws, 0);
    assert!(!consumer.animating());
}

#[tokio::test]
async fn test_noop_mutations_skip_the_redraw() {
    let (overlay, recorder) = shared_overlay();
    let mut consumer = FeedConsumer::new(NullTransport, overlay);

    consumer.dispatch(parse(r#"{"type": "advance", "amount": 0}"#));
    consumer.dispatch(parse(r#"{"type": "reset-group"}"#));

    assert_eq!(recorder.0.lock().unwrap().redraws, 0);
}

#[tokio::test(start_paused = true)]
async fn test_animator_stops_after_group_reset() {
    let (overlay, _recorder) = shared_overlay();
    let mut consumer = FeedConsumer::new(NullTransport, overlay.clone());

    consumer.dispatch(parse(
        r#"{"type": "update-devices", "devices": [{"name": "X"}]}"#,
    ));
    consumer.dispatch(parse(
        r#"{"type": "add-frame", "frame": {"duration": 1000, "value": 0.5}}"#,
    ));
    assert!(consumer.animating());

    consumer.dispatch(parse(r#"{"type": "reset-group"}"#));
    sleep(Duration::from_millis(100)).await;

    assert!(!consumer.animating());
    assert!(overlay.lock().unwrap().engine.buffer().is_empty());
}

// ---------------------------------------------------------------------------
// connection lifecycle

#[tokio::test(start_paused = true)]
async fn test_scripted_session_reaches_the_engine() {
    let (overlay, _recorder) = shared_overlay();
    let transport = ScriptedTransport {
        messages: vec![
            r#"{"type": "update-devices", "devices": [{"name": "X"}]}"#.to_string(),
            r#"{"type": "set-group", "group": {"username": "alice", "frames": [
                {"duration": 1000, "value": 1.0, "mode": "OVERRIDE", "targets": []}
            ]}}"#
                .to_string(),
            r#"{"type": "advance", "amount": 1000}"#.to_string(),
            "not even json".to_string(),
        ],
    };

    let consumer = FeedConsumer::new(transport, overlay.clone());
    let watch = consumer.watch();
    let handle = consumer.spawn();
    sleep(Duration::from_millis(50)).await;

    assert_eq!(watch.get(), ConnectionState::Connected);
    {
        let overlay = overlay.lock().unwrap();
        assert_eq!(overlay.engine.devices().len(), 1);
        assert_eq!(overlay.engine.clock().total(), 1_000.0);
        assert_eq!(overlay.engine.clock().frame_end(), 1_000.0);
    }

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_reconnect_retries_at_fixed_interval() {
    let attempts = Arc::new(Mutex::new(0));
    let (overlay, _recorder) = shared_overlay();
    let consumer = FeedConsumer::new(
        FailingTransport {
            attempts: attempts.clone(),
        },
        overlay,
    );
    let watch = consumer.watch();
    let handle = consumer.spawn();

    sleep(Duration::from_secs(10)).await;

    // one immediate attempt plus one per 3s retry window
    let seen = *attempts.lock().unwrap();
    assert!(seen >= 3, "expected repeated retries, saw {}", seen);
    assert_ne!(watch.get(), ConnectionState::Connected);

    handle.abort();
}
