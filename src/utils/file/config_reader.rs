use std::fs::File;
use std::path::Path;
use log::warn;
use crate::m3u_channels_error::{M3uChannelsError, M3uChannelsErrorKind, create_m3u_channels_error_result};
use crate::model::Config;

pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Reads the configuration file without preparing it.
///
/// `Ok(None)` is returned for a missing file unless `must_exist` is set.
pub fn read_config(config_file: &str, must_exist: bool) -> Result<Option<Config>, M3uChannelsError> {
    let path = Path::new(config_file);
    if path.exists() {
        match File::open(path) {
            Ok(file) => match serde_yaml::from_reader::<_, Config>(file) {
                Ok(result) => Ok(Some(result)),
                Err(err) => create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "cant read config file: {}", err),
            },
            Err(err) => create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "cant open config file {}: {}", config_file, err),
        }
    } else if must_exist {
        create_m3u_channels_error_result!(M3uChannelsErrorKind::Info, "config file not found: {}", config_file)
    } else {
        Ok(None)
    }
}

/// Validates the configuration read by [`read_config`], the built-in playlists and
/// radio channels are used when there was no file. Warnings are logged, so the
/// logger has to be initialized before.
pub fn prepare_config(config: Option<Config>, config_file: &str) -> Result<Config, M3uChannelsError> {
    let mut cfg = config.unwrap_or_else(|| {
        warn!("config file {config_file} not found, using built-in playlists");
        Config::default()
    });
    cfg.prepare()?;
    Ok(cfg)
}
