use indexmap::IndexMap;
use crate::m3u_channels_error::{M3uChannelsError, M3uChannelsErrorKind, create_m3u_channels_error_result};
use crate::model::channel::Channel;

/// Url value marking a playlist as the built-in radio list.
pub const INTERNAL_RADIO: &str = "INTERNAL_RADIO";

const RADIO_GROUP: &str = "Radio";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigPlaylist {
    pub name: String,
    pub url: String,
}

impl ConfigPlaylist {
    fn new(name: &str, url: &str) -> Self {
        Self { name: name.to_string(), url: url.to_string() }
    }

    pub fn to_source(&self) -> PlaylistSource {
        let url = self.url.trim();
        if url == INTERNAL_RADIO {
            PlaylistSource::InternalRadio
        } else {
            PlaylistSource::Remote(url.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSource {
    Remote(String),
    InternalRadio,
}

/// Playlist names in configuration order, read-only after startup.
#[derive(Debug, Clone, Default)]
pub struct PlaylistRegistry {
    sources: IndexMap<String, PlaylistSource>,
}

impl PlaylistRegistry {
    pub fn from_config(playlists: &[ConfigPlaylist]) -> Result<Self, M3uChannelsError> {
        let mut sources = IndexMap::with_capacity(playlists.len());
        let mut has_radio = false;
        for playlist in playlists {
            let name = playlist.name.trim();
            if name.is_empty() {
                return create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "playlist name should not be empty");
            }
            let source = playlist.to_source();
            match &source {
                PlaylistSource::InternalRadio => {
                    if has_radio {
                        return create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "only one playlist can use {INTERNAL_RADIO}, found second: {name}");
                    }
                    has_radio = true;
                }
                PlaylistSource::Remote(url) => {
                    if url.is_empty() {
                        return create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "playlist url should not be empty: {name}");
                    }
                }
            }
            if sources.insert(name.to_string(), source).is_some() {
                return create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "playlist names should be unique: {name}");
            }
        }
        if sources.is_empty() {
            return create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "at least one playlist should be configured");
        }
        Ok(Self { sources })
    }

    pub fn names(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    pub fn resolve(&self, name: &str) -> Option<&PlaylistSource> {
        self.sources.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Every playlist which has to be downloaded, as `(name, url)`.
    pub fn remote_sources(&self) -> impl Iterator<Item=(&str, &str)> {
        self.sources.iter().filter_map(|(name, source)| match source {
            PlaylistSource::Remote(url) => Some((name.as_str(), url.as_str())),
            PlaylistSource::InternalRadio => None,
        })
    }
}

pub fn default_playlist_name() -> String {
    String::from("Sri Lanka")
}

pub fn default_playlists() -> Vec<ConfigPlaylist> {
    vec![
        ConfigPlaylist::new("Sri Lanka", "https://iptv-org.github.io/iptv/countries/lk.m3u"),
        ConfigPlaylist::new("Radio", INTERNAL_RADIO),
        ConfigPlaylist::new("Music", "https://iptv-org.github.io/iptv/categories/music.m3u"),
        ConfigPlaylist::new("Kids", "https://iptv-org.github.io/iptv/categories/kids.m3u"),
        ConfigPlaylist::new("News", "https://iptv-org.github.io/iptv/categories/news.m3u"),
        ConfigPlaylist::new("Movies", "https://iptv-org.github.io/iptv/categories/movies.m3u"),
        ConfigPlaylist::new("Sports", "https://iptv-org.github.io/iptv/categories/sports.m3u"),
        ConfigPlaylist::new("Comedy", "https://iptv-org.github.io/iptv/categories/comedy.m3u"),
        ConfigPlaylist::new("Documentary", "https://iptv-org.github.io/iptv/categories/documentary.m3u"),
    ]
}

pub fn default_radio_channels() -> Vec<Channel> {
    [
        ("Hiru FM", "http://radio.lotustechnologieslk.net:2020/stream/hirufmgarden", "https://cdn-profiles.tunein.com/s106822/images/logod.png"),
        ("Shaa FM", "http://radio.lotustechnologieslk.net:2020/stream/shaafmgarden", "https://cdn-profiles.tunein.com/s106824/images/logod.png"),
        ("Gold FM", "http://radio.lotustechnologieslk.net:2020/stream/goldfmgarden", "https://cdn-profiles.tunein.com/s13370/images/logod.png"),
        ("Sun FM", "http://radio.lotustechnologieslk.net:2020/stream/sunfmgarden", "https://cdn-profiles.tunein.com/s13374/images/logod.png"),
        ("Sooriyan FM", "http://radio.lotustechnologieslk.net:2020/stream/sooriyanfmgarden", "https://cdn-profiles.tunein.com/s15652/images/logod.png"),
        ("Siyatha FM", "https://srv02.onlineradio.voaplus.com/siyathafm", "https://cdn-profiles.tunein.com/s107779/images/logod.png"),
        ("Y FM", "http://s3.voscast.com:8462/;stream.mp3", "https://cdn-profiles.tunein.com/s86358/images/logod.png"),
        ("Shree FM", "https://207.148.74.192:7874/stream2.mp3", "https://cdn-profiles.tunein.com/s107778/images/logod.png"),
    ].into_iter()
        .map(|(name, url, logo)| Channel::new(name, Some(logo), RADIO_GROUP, url))
        .collect()
}
