use std::path::Path;
use std::sync::Arc;
use axum::response::IntoResponse;
use crate::api::api_utils::serve_file;
use crate::api::model::app_state::AppState;

async fn index(
    axum::extract::State(app_state): axum::extract::State<Arc<AppState>>,
) -> impl axum::response::IntoResponse + Send {
    let path = Path::new(&app_state.config.api.web_root).join("index.html");
    serve_file(&path, mime::TEXT_HTML_UTF_8).await.into_response()
}

pub fn index_register(web_dir_path: &Path) -> axum::Router<Arc<AppState>> {
    axum::Router::new()
        .route("/", axum::routing::get(index))
        .fallback_service(tower_http::services::ServeDir::new(web_dir_path))
}
