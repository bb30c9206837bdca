use anyhow::{Context, Result};
use async_trait::async_trait;
use log::warn;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{timeout, Duration};

use super::config::VibeConfig;

/// Quiet period before a queued config write is pushed. Rapid UI
/// interaction (keystrokes, slider drags) must coalesce into one request.
pub const DEBOUNCE_MS: u64 = 300;

/// Write side of the panel's read-modify-write cycle
#[async_trait]
pub trait ConfigSink: Send + Sync + 'static {
    async fn push_config(&self, config: &VibeConfig) -> Result<()>;
}

/// REST client for the config panel surface
pub struct PanelClient {
    http: reqwest::Client,
    base_url: String,
}

impl PanelClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET /config
    pub async fn fetch_config(&self) -> Result<VibeConfig> {
        let url = format!("{}/config", self.base_url);
        let config = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding config response")?;
        Ok(config)
    }

    /// POST /clear: drop the pending playback queue server-side
    pub async fn clear_queue(&self) -> Result<()> {
        let url = format!("{}/clear", self.base_url);
        self.http.post(&url).send().await?.error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl ConfigSink for PanelClient {
    /// POST /config
    async fn push_config(&self, config: &VibeConfig) -> Result<()> {
        let url = format!("{}/config", self.base_url);
        self.http
            .post(&url)
            .json(config)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Debounced config writer: rapid submissions coalesce into a single push
/// once the panel has been quiet for the debounce window. Push failures are
/// logged, not surfaced; writes are best-effort.
pub struct ConfigWriter {
    tx: mpsc::UnboundedSender<VibeConfig>,
    handle: JoinHandle<()>,
}

impl ConfigWriter {
    pub fn spawn(sink: impl ConfigSink) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_writer(sink, rx));
        Self { tx, handle }
    }

    /// Queue a write; the latest submission wins
    pub fn submit(&self, config: VibeConfig) {
        let _ = self.tx.send(config);
    }

    pub fn shutdown(self) {
        self.handle.abort();
    }
}

async fn run_writer(sink: impl ConfigSink, mut rx: mpsc::UnboundedReceiver<VibeConfig>) {
    while let Some(first) = rx.recv().await {
        let mut pending = first;
        // wait out the quiet period, replacing the pending write each time
        // another submission lands inside it
        loop {
            match timeout(Duration::from_millis(DEBOUNCE_MS), rx.recv()).await {
                Ok(Some(next)) => pending = next,
                Ok(None) | Err(_) => break,
            }
        }
        if let Err(e) = sink.push_config(&pending).await {
            warn!("config write failed: {:#}", e);
        }
    }
}
