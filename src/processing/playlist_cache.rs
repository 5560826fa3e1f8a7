use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use futures::StreamExt;
use log::{info, warn};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::m3u_channels_error::{M3uChannelsError, notfound_err};
use crate::model::{Channel, Config, PlaylistRegistry, PlaylistSource};
use crate::utils::debug_if_enabled;
use crate::utils::network::m3u::get_m3u_playlist;
use crate::utils::network::request::PlaylistFetcher;

/// Parsed playlists by name. Entries are only replaced as a whole.
#[derive(Default)]
pub struct PlaylistCache {
    entries: RwLock<HashMap<String, Arc<Vec<Channel>>>>,
}

impl PlaylistCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, name: &str) -> Option<Arc<Vec<Channel>>> {
        self.entries.read().await.get(name).map(Arc::clone)
    }

    pub async fn put(&self, name: &str, channels: Vec<Channel>) -> Arc<Vec<Channel>> {
        let entry = Arc::new(channels);
        self.entries.write().await.insert(name.to_string(), Arc::clone(&entry));
        entry
    }

    pub async fn has(&self, name: &str) -> bool {
        self.entries.read().await.contains_key(name)
    }
}

enum PreloadOutcome {
    Cached,
    Skipped,
    Failed,
}

pub struct PlaylistManager {
    registry: PlaylistRegistry,
    radio_channels: Arc<Vec<Channel>>,
    fetcher: Arc<dyn PlaylistFetcher>,
    cache: PlaylistCache,
    preload_concurrency: usize,
}

impl PlaylistManager {
    pub fn new(cfg: &Config, fetcher: Arc<dyn PlaylistFetcher>) -> Self {
        Self::from_parts(cfg.t_registry.clone(), cfg.radio.clone(), fetcher, usize::from(cfg.fetch.preload_concurrency))
    }

    pub fn from_parts(registry: PlaylistRegistry, radio_channels: Vec<Channel>, fetcher: Arc<dyn PlaylistFetcher>, preload_concurrency: usize) -> Self {
        Self {
            registry,
            radio_channels: Arc::new(radio_channels),
            fetcher,
            cache: PlaylistCache::new(),
            preload_concurrency: preload_concurrency.max(1),
        }
    }

    pub fn list_playlist_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Returns the channels of the playlist `name`.
    ///
    /// The radio playlist is answered from the static radio list. A cached, non-empty
    /// playlist is returned as is, otherwise the playlist is downloaded, parsed and cached.
    /// A failed download results in an empty list, only an unknown name is an error.
    pub async fn get_channels(&self, name: &str) -> Result<Arc<Vec<Channel>>, M3uChannelsError> {
        let url = match self.registry.resolve(name) {
            Some(PlaylistSource::InternalRadio) => return Ok(Arc::clone(&self.radio_channels)),
            Some(PlaylistSource::Remote(url)) => url,
            None => return Err(notfound_err!("Unknown playlist {}", name)),
        };

        if let Some(channels) = self.cache.get(name).await {
            if !channels.is_empty() {
                return Ok(channels);
            }
        }

        debug_if_enabled!("Playlist {} not cached, downloading", name);
        let channels = match get_m3u_playlist(self.fetcher.as_ref(), url).await {
            Ok(channels) => channels,
            Err(err) => {
                warn!("Failed to load playlist {name}: {err}");
                vec![]
            }
        };
        Ok(self.cache.put(name, channels).await)
    }

    /// Downloads every remote playlist which is not cached yet.
    ///
    /// Failing playlists are skipped and stay uncached, the next request retries them.
    pub async fn preload_all(&self) {
        info!("Pre-loading playlists...");
        let start_time = Instant::now();
        let sources: Vec<(String, String)> = self.registry.remote_sources()
            .map(|(name, url)| (name.to_string(), url.to_string()))
            .collect();
        let outcomes: Vec<PreloadOutcome> = futures::stream::iter(sources)
            .map(|(name, url)| async move { self.preload_playlist(&name, &url).await })
            .buffer_unordered(self.preload_concurrency)
            .collect()
            .await;

        let cached = outcomes.iter().filter(|outcome| matches!(outcome, PreloadOutcome::Cached)).count();
        let skipped = outcomes.iter().filter(|outcome| matches!(outcome, PreloadOutcome::Skipped)).count();
        let failed = outcomes.iter().filter(|outcome| matches!(outcome, PreloadOutcome::Failed)).count();
        info!("Pre-loading finished in {}ms: {cached} cached, {skipped} skipped, {failed} failed", start_time.elapsed().as_millis());
    }

    async fn preload_playlist(&self, name: &str, url: &str) -> PreloadOutcome {
        if self.cache.has(name).await {
            return PreloadOutcome::Skipped;
        }
        match get_m3u_playlist(self.fetcher.as_ref(), url).await {
            Ok(channels) => {
                info!("Cached: {name} ({} channels)", channels.len());
                self.cache.put(name, channels).await;
                PreloadOutcome::Cached
            }
            Err(err) => {
                warn!("Failed to pre-load playlist {name}: {err}");
                PreloadOutcome::Failed
            }
        }
    }

    /// Runs [`PlaylistManager::preload_all`] in the background.
    pub fn start_preload(self: &Arc<Self>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            manager.preload_all().await;
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::m3u_channels_error::{M3uChannelsError, M3uChannelsErrorKind, create_m3u_channels_error_result};
    use crate::model::{default_playlists, default_radio_channels, Channel, ConfigPlaylist, FetchConfig, PlaylistRegistry, INTERNAL_RADIO};
    use crate::processing::playlist_cache::PlaylistManager;
    use crate::utils::network::request::{HttpPlaylistFetcher, PlaylistFetcher};

    const NEWS_URL: &str = "https://iptv-org.github.io/iptv/categories/news.m3u";
    const KIDS_URL: &str = "https://iptv-org.github.io/iptv/categories/kids.m3u";
    const MUSIC_URL: &str = "https://iptv-org.github.io/iptv/categories/music.m3u";

    /// Serves canned documents and counts the requests per url, unknown urls fail.
    #[derive(Default)]
    struct CountingFetcher {
        documents: HashMap<String, String>,
        calls: Mutex<HashMap<String, usize>>,
    }

    impl CountingFetcher {
        fn with_documents(documents: &[(&str, &str)]) -> Self {
            Self {
                documents: documents.iter().map(|(url, doc)| ((*url).to_string(), (*doc).to_string())).collect(),
                calls: Mutex::new(HashMap::new()),
            }
        }

        fn calls(&self, url: &str) -> usize {
            self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
        }

        fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().values().sum()
        }
    }

    #[async_trait]
    impl PlaylistFetcher for CountingFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String, M3uChannelsError> {
            *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
            match self.documents.get(url) {
                Some(document) => Ok(document.clone()),
                None => create_m3u_channels_error_result!(M3uChannelsErrorKind::Fetch, "connection refused {}", url),
            }
        }
    }

    fn news_playlist() -> &'static str {
        "#EXTM3U\n#EXTINF:-1 tvg-logo=\"https://logo.example/ada.png\" group-title=\"News\",Ada Derana 24\nhttps://derana.example/live.m3u8\n"
    }

    fn create_manager(fetcher: &Arc<CountingFetcher>) -> PlaylistManager {
        let registry = PlaylistRegistry::from_config(&default_playlists()).unwrap();
        PlaylistManager::from_parts(registry, default_radio_channels(), Arc::clone(fetcher) as Arc<dyn PlaylistFetcher>, 4)
    }

    #[tokio::test]
    async fn test_get_channels_fetches_once() {
        let fetcher = Arc::new(CountingFetcher::with_documents(&[(NEWS_URL, news_playlist())]));
        let manager = create_manager(&fetcher);

        let first = manager.get_channels("News").await.unwrap();
        assert_eq!(first.as_ref(), &vec![Channel::new("Ada Derana 24", Some("https://logo.example/ada.png"), "News", "https://derana.example/live.m3u8")]);
        let second = manager.get_channels("News").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(fetcher.calls(NEWS_URL), 1);
    }

    #[tokio::test]
    async fn test_empty_entry_is_refetched() {
        let fetcher = Arc::new(CountingFetcher::with_documents(&[(NEWS_URL, news_playlist())]));
        let manager = create_manager(&fetcher);
        manager.cache.put("News", vec![]).await;

        let channels = manager.get_channels("News").await.unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(fetcher.calls(NEWS_URL), 1);
        assert_eq!(manager.cache.get("News").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_empty_and_retries() {
        let fetcher = Arc::new(CountingFetcher::default());
        let manager = create_manager(&fetcher);

        assert!(manager.get_channels("Kids").await.unwrap().is_empty());
        assert!(manager.get_channels("Kids").await.unwrap().is_empty());
        assert_eq!(fetcher.calls(KIDS_URL), 2);
    }

    #[tokio::test]
    async fn test_radio_bypass() {
        let fetcher = Arc::new(CountingFetcher::default());
        let manager = create_manager(&fetcher);
        manager.preload_all().await;
        let calls_after_preload = fetcher.total_calls();

        let radio = manager.get_channels("Radio").await.unwrap();
        assert_eq!(radio.len(), 8);
        assert_eq!(radio[0].name, "Hiru FM");
        assert_eq!(fetcher.total_calls(), calls_after_preload);
        assert!(!manager.cache.has("Radio").await);
    }

    #[tokio::test]
    async fn test_unknown_playlist() {
        let fetcher = Arc::new(CountingFetcher::default());
        let manager = create_manager(&fetcher);

        let err = manager.get_channels("NotARealPlaylist").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_preload_isolation() {
        let fetcher = Arc::new(CountingFetcher::with_documents(&[
            (NEWS_URL, news_playlist()),
            (MUSIC_URL, "#EXTM3U\n"),
        ]));
        let manager = create_manager(&fetcher);
        manager.preload_all().await;

        assert_eq!(manager.cache.get("News").await.unwrap().len(), 1);
        // an empty download is cached, a failed one is not
        assert!(manager.cache.get("Music").await.unwrap().is_empty());
        assert!(!manager.cache.has("Kids").await);
        assert!(!manager.cache.has("Radio").await);
        assert_eq!(fetcher.total_calls(), 8);
        assert_eq!(fetcher.calls(NEWS_URL), 1);
    }

    #[tokio::test]
    async fn test_preload_skips_cached() {
        let fetcher = Arc::new(CountingFetcher::with_documents(&[(NEWS_URL, news_playlist())]));
        let manager = Arc::new(create_manager(&fetcher));
        manager.get_channels("News").await.unwrap();

        manager.start_preload().await.unwrap();
        assert_eq!(fetcher.calls(NEWS_URL), 1);
        assert_eq!(fetcher.calls(KIDS_URL), 1);

        manager.get_channels("News").await.unwrap();
        assert_eq!(fetcher.calls(NEWS_URL), 1);
    }

    #[tokio::test]
    async fn test_list_playlist_names() {
        let fetcher = Arc::new(CountingFetcher::default());
        let registry = PlaylistRegistry::from_config(&[
            ConfigPlaylist { name: "Zeta".to_string(), url: NEWS_URL.to_string() },
            ConfigPlaylist { name: "Alpha".to_string(), url: INTERNAL_RADIO.to_string() },
        ]).unwrap();
        let manager = PlaylistManager::from_parts(registry, vec![], fetcher, 0);
        assert_eq!(manager.list_playlist_names(), vec!["Zeta", "Alpha"]);
        assert!(manager.get_channels("Alpha").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_requests() {
        let fetcher = Arc::new(CountingFetcher::with_documents(&[(NEWS_URL, news_playlist())]));
        let manager = Arc::new(create_manager(&fetcher));
        let preload = manager.start_preload();
        let requests: Vec<_> = (0..8).map(|_| {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.get_channels("News").await })
        }).collect();
        for request in requests {
            assert_eq!(request.await.unwrap().unwrap().len(), 1);
        }
        preload.await.unwrap();
        assert_eq!(manager.cache.get("News").await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_requests_served_during_background_preload() {
        let fetcher = Arc::new(CountingFetcher::with_documents(&[(NEWS_URL, news_playlist())]));
        let manager = Arc::new(create_manager(&fetcher));
        drop(manager.start_preload());

        let channels = manager.get_channels("News").await.unwrap();
        assert_eq!(channels[0].name, "Ada Derana 24");
        assert_eq!(manager.get_channels("Radio").await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_http_error_is_cached_as_empty() {
        let router = axum::Router::new()
            .route("/broken.m3u", axum::routing::get(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        let registry = PlaylistRegistry::from_config(&[
            ConfigPlaylist { name: "Broken".to_string(), url: format!("http://{addr}/broken.m3u") },
        ]).unwrap();
        let fetcher = HttpPlaylistFetcher::new(&FetchConfig::default()).unwrap();
        let manager = PlaylistManager::from_parts(registry, vec![], Arc::new(fetcher), 1);

        assert!(manager.get_channels("Broken").await.unwrap().is_empty());
        assert!(manager.cache.get("Broken").await.unwrap().is_empty());
    }
}
