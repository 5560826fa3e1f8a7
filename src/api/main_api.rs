use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints::channel_api::channel_api_register;
use crate::api::endpoints::web_index::index_register;
use crate::api::model::app_state::AppState;
use crate::model::Config;
use crate::processing::playlist_cache::PlaylistManager;

pub fn create_router(app_state: Arc<AppState>) -> axum::Router {
    let web_dir_path = PathBuf::from(&app_state.config.api.web_root);
    if !web_dir_path.is_dir() {
        warn!("web_root does not exists or is not an directory: {}", web_dir_path.display());
    }

    axum::Router::new()
        .nest("/api", channel_api_register())
        .merge(index_register(&web_dir_path))
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([axum::http::Method::GET, axum::http::Method::HEAD, axum::http::Method::OPTIONS])
            .allow_headers(Any))
        .with_state(app_state)
}

pub async fn start_server(cfg: Arc<Config>, playlists: Arc<PlaylistManager>) -> std::io::Result<()> {
    let host = cfg.api.host.to_string();
    let port = cfg.api.port;

    let app_state = Arc::new(AppState {
        config: cfg,
        playlists,
    });
    let router = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("Server running: http://{host}:{port}");
    axum::serve(listener, router).await
}
