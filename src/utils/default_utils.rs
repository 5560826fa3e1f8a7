pub fn default_as_true() -> bool { true }

pub fn default_api_host() -> String { String::from("0.0.0.0") }

pub fn default_api_port() -> u16 { 5000 }

pub fn default_web_root() -> String { String::from("./web") }

pub fn default_fetch_timeout_secs() -> u64 { 15 }

pub fn default_preload_concurrency() -> u16 { 4 }
