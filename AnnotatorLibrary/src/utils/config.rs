use std::fs;
use tokio::sync::RwLock;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use Common::utils::logging::{console, LogEntry, LogLevel};

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

#[derive(Debug, Deserialize)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub internal_timestamp: u64, //milliseconds
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub refresh_interval: u64, //seconds
    pub session_idle_duration: u64, //seconds
    pub max_upload_size: u64, //bytes
    pub font_path: String, //path
    pub font_size: f32, //points
    pub border_width: u32, //pixels
    pub border_color: [u8; 3], //RGB
    pub text_color: [u8; 3], //RGB
}

impl Config {
    pub fn new() -> Self {
        //Seriously, the program must be terminated.
        match fs::read_to_string("./annotator.toml") {
            Ok(toml_string) => {
                match toml::from_str::<ConfigTable>(&toml_string) {
                    Ok(config_table) => {
                        let config = config_table.config;
                        if !Self::validate(&config) {
                            console(&LogEntry::new(LogLevel::Emergency, "Config", "Invalid configuration file", ""));
                            panic!("Invalid configuration file");
                        }
                        config
                    },
                    Err(err) => {
                        console(&LogEntry::new(LogLevel::Emergency, "Config", "Unable to parse configuration file", format!("Err: {err}")));
                        panic!("Unable to parse configuration file");
                    },
                }
            },
            Err(err) => {
                console(&LogEntry::new(LogLevel::Emergency, "Config", "Configuration file not found", format!("Err: {err}")));
                panic!("Configuration file not found");
            },
        }
    }

    pub async fn now() -> Config {
        CONFIG.read().await.clone()
    }

    pub async fn update(config: Config) {
        *CONFIG.write().await = config
    }

    pub fn validate(config: &Config) -> bool {
        Config::validate_mini_second(config.internal_timestamp)
            && Config::validate_second(config.bind_retry_duration)
            && Config::validate_second(config.refresh_interval)
            && Config::validate_idle_duration(config.session_idle_duration)
            && Config::validate_upload_size(config.max_upload_size)
            && Config::validate_font_size(config.font_size)
            && Config::validate_border_width(config.border_width)
    }

    fn validate_mini_second(second: u64) -> bool {
        second <= 60000
    }

    fn validate_second(second: u64) -> bool {
        second <= 3600
    }

    fn validate_idle_duration(second: u64) -> bool {
        second > 0 && second <= 86400
    }

    fn validate_upload_size(bytes: u64) -> bool {
        bytes > 0 && bytes <= 1_073_741_824
    }

    fn validate_border_width(width: u32) -> bool {
        width > 0_u32
    }

    fn validate_font_size(size: f32) -> bool {
        size > 0_f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            internal_timestamp: 100,
            http_server_bind_port: 8080,
            bind_retry_duration: 5,
            refresh_interval: 60,
            session_idle_duration: 1800,
            max_upload_size: 52_428_800,
            font_path: "./font.ttf".to_string(),
            font_size: 24.0,
            border_width: 3,
            border_color: [0, 0, 255],
            text_color: [255, 0, 0],
        }
    }

    #[test]
    fn valid_config_accepted() {
        assert!(Config::validate(&base_config()));
    }

    #[test]
    fn zero_idle_duration_rejected() {
        let mut config = base_config();
        config.session_idle_duration = 0;
        assert!(!Config::validate(&config));
    }

    #[test]
    fn oversized_upload_limit_rejected() {
        let mut config = base_config();
        config.max_upload_size = 2_147_483_648;
        assert!(!Config::validate(&config));
    }

    #[test]
    fn zero_border_width_rejected() {
        let mut config = base_config();
        config.border_width = 0;
        assert!(!Config::validate(&config));
    }
}
