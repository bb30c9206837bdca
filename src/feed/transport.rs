use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use log::debug;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Connection factory for the inbound event feed
#[async_trait]
pub trait FeedTransport: Send {
    async fn connect(&mut self) -> Result<Box<dyn FeedStream>>;
}

/// One live feed connection
#[async_trait]
pub trait FeedStream: Send {
    /// Next text message, or `None` once the peer closed the connection
    async fn next_message(&mut self) -> Result<Option<String>>;
}

/// Websocket transport for the overlay's same-origin control link
pub struct WsTransport {
    url: String,
}

impl WsTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl FeedTransport for WsTransport {
    async fn connect(&mut self) -> Result<Box<dyn FeedStream>> {
        let (socket, _response) = connect_async(self.url.as_str())
            .await
            .with_context(|| format!("connecting to {}", self.url))?;
        Ok(Box::new(WsStream { socket }))
    }
}

struct WsStream {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl FeedStream for WsStream {
    async fn next_message(&mut self) -> Result<Option<String>> {
        while let Some(message) = self.socket.next().await {
            match message.context("feed socket error")? {
                Message::Text(text) => return Ok(Some(text)),
                Message::Close(_) => return Ok(None),
                other => debug!("skipping non-text feed message: {:?}", other),
            }
        }
        Ok(None)
    }
}
