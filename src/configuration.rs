use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "configuration";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub forum: ForumSettings,
    pub line: LineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

/// Where and how hard to crawl.
#[derive(Debug, Deserialize, Clone)]
pub struct ForumSettings {
    /// Board root; search pages live under `{base_url}/search`.
    pub base_url: String,
    pub concurrency: usize,
    pub request_timeout_secs: u64,
    pub crawl_timeout_secs: u64,
}

impl ForumSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn crawl_timeout(&self) -> Duration {
        Duration::from_secs(self.crawl_timeout_secs)
    }
}

impl Default for ForumSettings {
    fn default() -> Self {
        ForumSettings {
            base_url: "https://www.ptt.cc/bbs/movie".to_string(),
            concurrency: 20,
            request_timeout_secs: 10,
            crawl_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LineSettings {
    pub channel_access_token: String,
    pub channel_secret: String,
    pub api_base_url: String,
    pub reply_timeout_secs: u64,
}

impl LineSettings {
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }
}

/// Defaults, then an optional `configuration.{yaml,toml,ini,json}` file,
/// then `APP__SECTION__KEY` environment variables.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let forum = ForumSettings::default();

    Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 8000)?
        .set_default("forum.base_url", forum.base_url)?
        .set_default("forum.concurrency", forum.concurrency as u64)?
        .set_default("forum.request_timeout_secs", forum.request_timeout_secs)?
        .set_default("forum.crawl_timeout_secs", forum.crawl_timeout_secs)?
        .set_default("line.api_base_url", "https://api.line.me")?
        .set_default("line.reply_timeout_secs", 10)?
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}
