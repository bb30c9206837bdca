use std::sync::{Arc, Mutex};

use log::{info, warn};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

use crate::overlay::SharedOverlay;
use crate::render::Animator;

use super::event::FeedEvent;
use super::transport::FeedTransport;

/// Fixed delay between reconnect attempts. The feed is a same-origin local
/// control link, so there is no backoff growth and no retry cutoff.
pub const RETRY_DELAY_MS: u64 = 3_000;

/// Lifecycle of the feed link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Shareable view of the connection state, for a "connecting" indicator
#[derive(Clone)]
pub struct ConnectionWatch(Arc<Mutex<ConnectionState>>);

impl ConnectionWatch {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(ConnectionState::Disconnected)))
    }

    pub fn get(&self) -> ConnectionState {
        *self.0.lock().unwrap()
    }

    fn set(&self, state: ConnectionState) {
        *self.0.lock().unwrap() = state;
    }
}

/// Consumes the inbound event feed: owns the reconnect state machine,
/// dispatches each message to the engine, and arms the animation loop when
/// new timeline data arrives.
pub struct FeedConsumer<T: FeedTransport> {
    transport: T,
    overlay: SharedOverlay,
    animator: Animator,
    state: ConnectionWatch,
}

impl<T: FeedTransport + 'static> FeedConsumer<T> {
    pub fn new(transport: T, overlay: SharedOverlay) -> Self {
        Self {
            transport,
            overlay,
            animator: Animator::new(),
            state: ConnectionWatch::new(),
        }
    }

    pub fn watch(&self) -> ConnectionWatch {
        self.state.clone()
    }

    /// Spawn the consumer. Aborting the returned handle tears the component
    /// down: the connection closes and the animation loop is cancelled with
    /// the dropped consumer.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run until torn down: connect, drain messages, and retry at a fixed
    /// interval after any failure or disconnect.
    pub async fn run(mut self) {
        loop {
            self.state.set(ConnectionState::Connecting);
            info!("connecting to event feed");

            match self.transport.connect().await {
                Ok(mut stream) => {
                    self.state.set(ConnectionState::Connected);
                    info!("event feed connected");
                    loop {
                        match stream.next_message().await {
                            Ok(Some(raw)) => self.handle_message(&raw),
                            Ok(None) => {
                                info!("event feed closed by peer");
                                break;
                            }
                            Err(e) => {
                                warn!("event feed read failed: {:#}", e);
                                break;
                            }
                        }
                    }
                }
                Err(e) => warn!("event feed connect failed: {:#}", e),
            }

            self.state.set(ConnectionState::Disconnected);
            sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
        }
    }

    fn handle_message(&mut self, raw: &str) {
        match FeedEvent::parse(raw) {
            Ok(event) => self.dispatch(event),
            Err(e) => warn!("ignoring malformed feed message: {:#}", e),
        }
    }

    /// Apply one event. Any mutation triggers an immediate redraw so state
    /// changes are visible before the next scheduled animation frame.
    pub fn dispatch(&mut self, event: FeedEvent) {
        let mut overlay = self.overlay.lock().unwrap();
        let changed = match event {
            FeedEvent::Ping => false,
            FeedEvent::UpdateConfig { config } => overlay.engine.update_config(config),
            FeedEvent::UpdateDevices { devices } => overlay.engine.update_devices(devices),
            FeedEvent::ResetGroup => overlay.engine.reset_group(),
            FeedEvent::SetGroup { group } => {
                let changed = overlay.engine.set_group(group);
                if !overlay.engine.buffer().is_empty() {
                    self.animator.ensure_running(self.overlay.clone());
                }
                changed
            }
            FeedEvent::AddFrame { frame } => {
                let changed = overlay.engine.add_frame(&frame);
                if changed {
                    self.animator.ensure_running(self.overlay.clone());
                }
                changed
            }
            FeedEvent::Advance { amount } => overlay.engine.advance(amount),
            FeedEvent::Unknown(kind) => {
                warn!("ignoring unknown feed event kind: {:?}", kind);
                false
            }
        };
        if changed {
            overlay.redraw();
        }
    }

    /// Whether the animation loop is currently live
    pub fn animating(&self) -> bool {
        self.animator.is_running()
    }
}
