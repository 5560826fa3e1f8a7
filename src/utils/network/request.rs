use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use regex::Regex;
use url::Url;

use crate::m3u_channels_error::{str_to_io_error, M3uChannelsError, M3uChannelsErrorKind, create_m3u_channels_error};
use crate::model::FetchConfig;
use crate::utils::compression::compression_utils::decode_text_content;
use crate::utils::debug_if_enabled;

/// Source of raw playlist documents.
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, M3uChannelsError>;
}

/// Downloads playlists over http(s), `file://` urls are read from disk.
pub struct HttpPlaylistFetcher {
    client: reqwest::Client,
}

impl HttpPlaylistFetcher {
    pub fn new(fetch_config: &FetchConfig) -> Result<Self, M3uChannelsError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(fetch_config.timeout_secs))
            .build()
            .map(Self::with_client)
            .map_err(|err| create_m3u_channels_error!(M3uChannelsErrorKind::Info, "cant create http client: {}", err))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlaylistFetcher for HttpPlaylistFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, M3uChannelsError> {
        download_text_content(&self.client, url).await
            .map_err(|err| create_m3u_channels_error!(M3uChannelsErrorKind::Fetch, "Failed to download {} => {}", sanitize_sensitive_info(url), sanitize_sensitive_info(err.to_string().as_str())))
    }
}

async fn get_local_file_content(file_path: &Path) -> Result<String, std::io::Error> {
    if file_path.is_file() {
        let content = tokio::fs::read(file_path).await?;
        return decode_text_content(&content);
    }
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, format!("Cant find file {}", file_path.display())))
}

async fn get_remote_content(client: &reqwest::Client, url: &Url) -> Result<String, std::io::Error> {
    let start_time = Instant::now();
    let response = client.get(url.clone()).send().await
        .map_err(|err| str_to_io_error(&format!("Request failed {} {err}", sanitize_sensitive_info(url.as_str()))))?;
    if !response.status().is_success() {
        return Err(str_to_io_error(&format!("Request failed with status {} {}", response.status(), sanitize_sensitive_info(url.as_str()))));
    }
    let bytes = response.bytes().await
        .map_err(|err| str_to_io_error(&format!("failed to read response {} {err}", sanitize_sensitive_info(url.as_str()))))?;
    let content = decode_text_content(&bytes)?;
    debug_if_enabled!("Request took:{}ms {}", start_time.elapsed().as_millis(), sanitize_sensitive_info(url.as_str()));
    Ok(content)
}

pub async fn download_text_content(client: &reqwest::Client, url_str: &str) -> Result<String, std::io::Error> {
    if let Ok(url) = url_str.parse::<Url>() {
        if url.scheme() == "file" {
            match url.to_file_path() {
                Ok(file_path) => get_local_file_content(&file_path).await,
                Err(()) => Err(str_to_io_error(&format!("Unknown file {}", sanitize_sensitive_info(url_str)))),
            }
        } else {
            get_remote_content(client, &url).await
        }
    } else {
        Err(str_to_io_error(&format!("Malformed URL {}", sanitize_sensitive_info(url_str))))
    }
}

static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(username=)[^&]*").unwrap());
static PASSWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(password=)[^&]*").unwrap());
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(token=)[^&]*").unwrap());
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.*://).*?/(.*)").unwrap());

static SANITIZE_SENSITIVE_INFO: LazyLock<AtomicBool> = LazyLock::new(|| AtomicBool::new(true));

pub fn set_sanitize_sensitive_info(value: bool) {
    SANITIZE_SENSITIVE_INFO.store(value, Ordering::Relaxed);
}

pub fn sanitize_sensitive_info(query: &str) -> String {
    if SANITIZE_SENSITIVE_INFO.load(Ordering::Relaxed) {
        mask_sensitive_info(query)
    } else {
        query.to_string()
    }
}

fn mask_sensitive_info(query: &str) -> String {
    let masked_query = USERNAME_REGEX.replace_all(query, "$1***");
    let masked_query = PASSWORD_REGEX.replace_all(&masked_query, "$1***");
    let masked_query = TOKEN_REGEX.replace_all(&masked_query, "$1***");
    let masked_query = URL_REGEX.replace_all(&masked_query, "$1***/$2");
    masked_query.to_string()
}
