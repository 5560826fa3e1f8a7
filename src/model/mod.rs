mod channel;
mod config;
mod config_api;
mod config_fetch;
mod config_log;
mod config_playlist;

pub use self::channel::*;
pub use self::config::*;
pub use self::config_api::*;
pub use self::config_fetch::*;
pub use self::config_log::*;
pub use self::config_playlist::*;
