#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ChannelsRequest {
    #[serde(default)]
    pub playlist: Option<String>,
}
