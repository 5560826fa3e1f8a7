pub mod parser;
pub mod playlist_cache;
