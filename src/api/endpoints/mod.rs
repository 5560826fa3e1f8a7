pub mod channel_api;
pub mod web_index;
