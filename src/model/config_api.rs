use log::warn;
use crate::utils::{default_api_host, default_api_port, default_web_root};

pub const PORT_ENV_VAR: &str = "PORT";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigApi {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_web_root")]
    pub web_root: String,
}

impl Default for ConfigApi {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
            web_root: default_web_root(),
        }
    }
}

impl ConfigApi {
    /// `env_port` is the value of the `PORT` environment variable, it wins over the configured port.
    pub fn prepare(&mut self, env_port: Option<&str>) {
        if self.host.trim().is_empty() {
            self.host = default_api_host();
        }
        if self.web_root.trim().is_empty() {
            self.web_root = default_web_root();
        }
        if let Some(port_value) = env_port {
            match port_value.trim().parse::<u16>() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring invalid {PORT_ENV_VAR} value: {port_value}"),
            }
        }
    }
}
