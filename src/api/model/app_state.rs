use std::sync::Arc;
use crate::model::Config;
use crate::processing::playlist_cache::PlaylistManager;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub playlists: Arc<PlaylistManager>,
}
