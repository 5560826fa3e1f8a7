use crate::model::{Channel, DEFAULT_CHANNEL_GROUP, DEFAULT_CHANNEL_NAME};

const EXTINF_TAG: &str = "#EXTINF";
const STREAM_URL_PREFIX: &str = "http";
const ATTR_LOGO: &str = "tvg-logo";
const ATTR_GROUP: &str = "group-title";

/// Returns the first non-empty quoted value of `key="value"` inside `line`.
pub fn extract_attribute<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let token = format!("{key}=\"");
    line.match_indices(token.as_str()).find_map(|(pos, _)| {
        let value = &line[pos + token.len()..];
        value.find('"').filter(|end| *end > 0).map(|end| &value[..end])
    })
}

/// Channel metadata collected from the last `#EXTINF` line, waiting for its stream url.
struct PendingHeader {
    name: Option<String>,
    logo: Option<String>,
    group: String,
}

impl Default for PendingHeader {
    fn default() -> Self {
        Self {
            name: None,
            logo: None,
            group: String::from(DEFAULT_CHANNEL_GROUP),
        }
    }
}

fn process_header(line: &str) -> PendingHeader {
    let logo = extract_attribute(line, ATTR_LOGO).map(ToString::to_string);
    let group = extract_attribute(line, ATTR_GROUP)
        .map_or_else(|| String::from(DEFAULT_CHANNEL_GROUP), |group| group.trim().to_string());
    // the name follows the last comma, titles and group names may contain commas too
    let name = line.rsplit_once(',')
        .map_or(DEFAULT_CHANNEL_NAME, |(_, title)| title.trim());
    PendingHeader {
        name: Some(name.to_string()).filter(|n| !n.is_empty()),
        logo,
        group,
    }
}

pub fn consume_m3u<'a, I, F: FnMut(Channel)>(lines: I, mut visit: F)
where
    I: Iterator<Item=&'a str>,
{
    let mut header = PendingHeader::default();
    for raw_line in lines {
        let line = raw_line.trim();
        if line.starts_with(EXTINF_TAG) {
            header = process_header(line);
        } else if line.starts_with(STREAM_URL_PREFIX) {
            // logo and group stay, only the name is consumed by the stream url
            if let Some(name) = header.name.take() {
                visit(Channel {
                    name,
                    logo: header.logo.clone(),
                    group: header.group.clone(),
                    url: line.to_string(),
                });
            }
        }
    }
}

pub fn parse_m3u<'a, I>(lines: I) -> Vec<Channel>
where
    I: Iterator<Item=&'a str>,
{
    let mut channels = Vec::new();
    consume_m3u(lines, |channel| channels.push(channel));
    channels
}
