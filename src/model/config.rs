use crate::m3u_channels_error::{M3uChannelsError, M3uChannelsErrorKind, create_m3u_channels_error_result};
use crate::model::{default_playlist_name, default_playlists, default_radio_channels, Channel, ConfigApi, ConfigPlaylist, FetchConfig, LogConfig, PlaylistRegistry, PORT_ENV_VAR};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ConfigApi,
    #[serde(default = "default_playlist_name")]
    pub default_playlist: String,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfig>,
    #[serde(default = "default_playlists")]
    pub playlists: Vec<ConfigPlaylist>,
    #[serde(default = "default_radio_channels")]
    pub radio: Vec<Channel>,
    #[serde(skip)]
    pub t_registry: PlaylistRegistry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ConfigApi::default(),
            default_playlist: default_playlist_name(),
            fetch: FetchConfig::default(),
            log: None,
            playlists: default_playlists(),
            radio: default_radio_channels(),
            t_registry: PlaylistRegistry::default(),
        }
    }
}

impl Config {
    pub fn prepare(&mut self) -> Result<(), M3uChannelsError> {
        let env_port = std::env::var(PORT_ENV_VAR).ok();
        self.prepare_with_port(env_port.as_deref())
    }

    pub(crate) fn prepare_with_port(&mut self, env_port: Option<&str>) -> Result<(), M3uChannelsError> {
        self.api.prepare(env_port);
        self.fetch.prepare()?;
        self.t_registry = PlaylistRegistry::from_config(&self.playlists)?;
        self.default_playlist = self.default_playlist.trim().to_string();
        if !self.t_registry.contains(&self.default_playlist) {
            return create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "default_playlist is not a configured playlist: {}", self.default_playlist);
        }
        if let Some(channel) = self.radio.iter().find(|channel| channel.url.trim().is_empty()) {
            return create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "radio channel without url: {}", channel.name);
        }
        Ok(())
    }

    pub fn sanitize_sensitive_info(&self) -> bool {
        self.log.as_ref().map_or(true, |log| log.sanitize_sensitive_info)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log.as_ref().and_then(|log| log.log_level.as_deref())
    }
}
