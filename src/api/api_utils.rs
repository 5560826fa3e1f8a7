use std::path::Path;
use axum::response::IntoResponse;
use log::error;

pub async fn serve_file(file_path: &Path, mime_type: mime::Mime) -> impl axum::response::IntoResponse + Send {
    if file_path.exists() {
        match tokio::fs::read(file_path).await {
            Ok(content) => {
                return ([
                    (axum::http::header::CONTENT_TYPE, mime_type.to_string()),
                    (axum::http::header::CACHE_CONTROL, String::from("no-cache")),
                ], content).into_response();
            }
            Err(err) => error!("cant read file {}: {err}", file_path.display()),
        }
    }
    axum::http::StatusCode::NO_CONTENT.into_response()
}
