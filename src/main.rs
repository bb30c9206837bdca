use anyhow::Result;
use log::{error, info, warn};

use vibegraph::core::MAX_SLOTS;
use vibegraph::feed::{FeedConsumer, WsTransport};
use vibegraph::overlay::Overlay;
use vibegraph::panel::PanelClient;
use vibegraph::render::TextSurface;

const DEFAULT_FEED_URL: &str = "ws://127.0.0.1:8000/vibegraph/";
const SURFACE_HEIGHT_PX: f64 = 200.0;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

    let surface = match TextSurface::new(MAX_SLOTS, SURFACE_HEIGHT_PX) {
        Ok(surface) => surface,
        Err(e) => {
            // structural setup problem, not transient; no retry
            error!("chart surface unavailable: {:#}", e);
            return Ok(());
        }
    };

    let overlay = Overlay::shared(Box::new(surface));

    if let Ok(base_url) = std::env::var("VIBEGRAPH_PANEL_URL") {
        let panel = PanelClient::new(base_url);
        match panel.fetch_config().await {
            Ok(config) => {
                overlay.lock().unwrap().engine.update_config(config);
            }
            Err(e) => warn!("initial config fetch failed: {:#}", e),
        }
    }

    let consumer = FeedConsumer::new(WsTransport::new(url), overlay);
    let watch = consumer.watch();
    let feed = consumer.spawn();

    info!("overlay running; press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;
    info!("shutting down (feed state: {:?})", watch.get());
    feed.abort();

    Ok(())
}
