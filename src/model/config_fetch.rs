use crate::m3u_channels_error::{M3uChannelsError, M3uChannelsErrorKind, create_m3u_channels_error_result};
use crate::utils::{default_fetch_timeout_secs, default_preload_concurrency};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_preload_concurrency")]
    pub preload_concurrency: u16,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
            preload_concurrency: default_preload_concurrency(),
        }
    }
}

impl FetchConfig {
    pub fn prepare(&mut self) -> Result<(), M3uChannelsError> {
        if self.timeout_secs == 0 {
            return create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "fetch timeout_secs must be greater than 0");
        }
        if self.preload_concurrency == 0 {
            self.preload_concurrency = 1;
        }
        Ok(())
    }
}
