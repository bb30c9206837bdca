pub mod client;
pub mod config;

pub use client::{ConfigSink, ConfigWriter, PanelClient, DEBOUNCE_MS};
pub use config::VibeConfig;
