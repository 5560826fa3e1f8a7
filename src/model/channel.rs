// https://de.wikipedia.org/wiki/M3U

pub const DEFAULT_CHANNEL_NAME: &str = "Unknown Channel";
pub const DEFAULT_CHANNEL_GROUP: &str = "Others";

/// One playable listing of a playlist.
///
/// Serialized for the web ui as `{name, logo, group, url}`, `logo` is `null` when the
/// playlist carries no `tvg-logo` for the entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Channel {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "default_channel_group")]
    pub group: String,
    pub url: String,
}

fn default_channel_group() -> String {
    String::from(DEFAULT_CHANNEL_GROUP)
}

impl Channel {
    pub fn new(name: &str, logo: Option<&str>, group: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            logo: logo.map(ToString::to_string),
            group: group.to_string(),
            url: url.to_string(),
        }
    }
}
