use std::sync::Arc;
use axum::response::IntoResponse;
use log::error;
use serde_json::json;
use crate::api::model::app_state::AppState;
use crate::api::model::request::ChannelsRequest;
use crate::model::Channel;
use crate::utils::debug_if_enabled;

async fn playlists(
    axum::extract::State(app_state): axum::extract::State<Arc<AppState>>,
) -> impl axum::response::IntoResponse + Send {
    axum::Json(app_state.playlists.list_playlist_names())
}

async fn channels(
    axum::extract::Query(req): axum::extract::Query<ChannelsRequest>,
    axum::extract::State(app_state): axum::extract::State<Arc<AppState>>,
) -> impl axum::response::IntoResponse + Send {
    let playlist = req.playlist.as_deref().unwrap_or(app_state.config.default_playlist.as_str());
    match app_state.playlists.get_channels(playlist).await {
        Ok(channels) => {
            debug_if_enabled!("Serving playlist {} with {} channels", playlist, channels.len());
            axum::Json(channels).into_response()
        }
        Err(err) if err.is_not_found() => {
            debug_if_enabled!("Requested unknown playlist {}", playlist);
            (axum::http::StatusCode::NOT_FOUND, axum::Json(Vec::<Channel>::new())).into_response()
        }
        Err(err) => {
            error!("Failed to serve playlist {playlist}: {err}");
            (axum::http::StatusCode::INTERNAL_SERVER_ERROR, axum::Json(json!({"error": err.to_string()}))).into_response()
        }
    }
}

pub fn channel_api_register() -> axum::Router<Arc<AppState>> {
    axum::Router::new()
        .route("/playlists", axum::routing::get(playlists))
        .route("/channels", axum::routing::get(channels))
}
