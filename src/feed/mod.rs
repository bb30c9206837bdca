pub mod consumer;
pub mod event;
pub mod transport;

pub use consumer::{ConnectionState, ConnectionWatch, FeedConsumer, RETRY_DELAY_MS};
pub use event::FeedEvent;
pub use transport::{FeedStream, FeedTransport, WsTransport};
