use crate::m3u_channels_error::M3uChannelsError;
use crate::model::Channel;
use crate::processing::parser::m3u;
use crate::utils::network::request::PlaylistFetcher;

pub async fn get_m3u_playlist(fetcher: &dyn PlaylistFetcher, url: &str) -> Result<Vec<Channel>, M3uChannelsError> {
    let text = fetcher.fetch_text(url).await?;
    Ok(m3u::parse_m3u(text.lines()))
}
