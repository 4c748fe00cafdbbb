// IronMQ Infrastructure - HTTP Adapter
// Implements: QueueService over the IronMQ v3 REST API

mod client;
mod settings;
mod wire;

pub use client::IronMqClient;
pub use settings::{load_settings, IronMqSettings, SettingsSources};
