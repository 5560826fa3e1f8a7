use std::sync::Arc;

use clap::Parser;
use env_logger::Builder;
use log::info;

use crate::api::main_api::start_server;
use crate::processing::playlist_cache::PlaylistManager;
use crate::utils::file::config_reader::{prepare_config, read_config, DEFAULT_CONFIG_FILE};
use crate::utils::network::request::{set_sanitize_sensitive_info, HttpPlaylistFetcher};

mod api;
mod m3u_channels_error;
mod model;
mod processing;
mod utils;

const LOG_ENV: &str = "RUST_LOG";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser)]
#[command(version, about = "M3U playlist channel listing service", long_about = None)]
struct Args {
    /// The config file
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,

    /// Log level, plain level or env_logger filter syntax
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,

    /// Do not download the playlists on startup
    #[arg(long = "no-preload", default_value_t = false)]
    no_preload: bool,
}

fn main() {
    let args = Args::parse();

    let config_file = args.config_file.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);
    let cfg_result = read_config(config_file, args.config_file.is_some());

    let config_log_level = cfg_result.as_ref().ok().and_then(Option::as_ref).and_then(|cfg| cfg.log_level());
    init_logger(args.log_level.as_deref(), config_log_level);

    // prepared after the logger is up, it warns about the fallbacks it applies
    let cfg = match cfg_result.and_then(|cfg| prepare_config(cfg, config_file)) {
        Ok(cfg) => Arc::new(cfg),
        Err(err) => exit!("{}", err),
    };
    set_sanitize_sensitive_info(cfg.sanitize_sensitive_info());

    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    if let Some(build_time) = option_env!("VERGEN_BUILD_TIMESTAMP") {
        info!("Build time: {build_time}");
    }

    let fetcher = match HttpPlaylistFetcher::new(&cfg.fetch) {
        Ok(fetcher) => Arc::new(fetcher),
        Err(err) => exit!("{}", err),
    };

    let no_preload = args.no_preload;
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => exit!("cant start runtime: {}", err),
    };

    let result = runtime.block_on(async move {
        let playlists = Arc::new(PlaylistManager::new(&cfg, fetcher));
        if no_preload {
            info!("Playlist pre-loading disabled");
        } else {
            // not awaited, requests are served while the playlists are loading
            drop(playlists.start_preload());
        }
        start_server(cfg, playlists).await
    });

    if let Err(err) = result {
        exit!("cant start server: {}", err);
    }
}

fn init_logger(user_log_level: Option<&str>, config_log_level: Option<&str>) {
    let env_log_level = std::env::var(LOG_ENV).ok();
    let log_level = user_log_level
        .or(config_log_level)
        .or(env_log_level.as_deref())
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let mut log_builder = Builder::new();
    log_builder.parse_filters(log_level);
    log_builder.init();
    info!("Log Level {log_level}");
}
