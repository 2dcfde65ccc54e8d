use std::env;
use thiserror::Error;
use url::Url;

const NAVER_RSS_BASE_URL: &str = "https://rss.blog.naver.com";
const DEFAULT_STORE_TABLE: &str = "blog_posts";
const DEFAULT_REQUEST_TIMEOUT_IN_SECONDS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("{name} is not a valid http(s) url: {value}")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub feed_identifier: Option<String>,
    pub feed_url: String,
    pub store_url: String,
    pub store_credential: String,
    pub store_table: String,
    pub webhook_url: String,
    pub request_timeout_in_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let feed_identifier = value("BLOG_NAME");
        let feed_url = match value("FEED_URL") {
            Some(url) => url,
            None => {
                let blog_name = feed_identifier
                    .as_ref()
                    .ok_or(ConfigError::Missing("BLOG_NAME"))?;

                naver_feed_url(blog_name)
            }
        };

        let request_timeout_in_seconds = match value("REQUEST_TIMEOUT_IN_SECONDS") {
            None => DEFAULT_REQUEST_TIMEOUT_IN_SECONDS,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "REQUEST_TIMEOUT_IN_SECONDS",
                    value: raw.clone(),
                })?,
        };

        let config = Config {
            feed_identifier,
            feed_url,
            store_url: value("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?,
            store_credential: value("SUPABASE_ANON_KEY")
                .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            store_table: value("SUPABASE_TABLE")
                .unwrap_or_else(|| DEFAULT_STORE_TABLE.to_string()),
            webhook_url: value("DISCORD_WEBHOOK_URL")
                .ok_or(ConfigError::Missing("DISCORD_WEBHOOK_URL"))?,
            request_timeout_in_seconds,
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("FEED_URL", &self.feed_url)?;
        validate_url("SUPABASE_URL", &self.store_url)?;
        validate_url("DISCORD_WEBHOOK_URL", &self.webhook_url)?;

        if self.store_credential.trim().is_empty() {
            return Err(ConfigError::Missing("SUPABASE_ANON_KEY"));
        }

        if self.store_table.trim().is_empty() {
            return Err(ConfigError::Missing("SUPABASE_TABLE"));
        }

        if self.request_timeout_in_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_IN_SECONDS",
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

pub fn naver_feed_url(blog_name: &str) -> String {
    format!("{NAVER_RSS_BASE_URL}/{}.xml", blog_name.trim())
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        }),
    }
}
