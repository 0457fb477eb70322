//! Telegram channels: the registry of configured destinations and the per-channel send.

mod registry;
mod telegram;

pub use registry::ChannelRegistry;
pub use telegram::Channel;
