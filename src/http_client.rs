use crate::config::Config;
use isahc::config::RedirectPolicy;
use isahc::prelude::*;
use isahc::HttpClient;
use std::time::Duration;

const USER_AGENT: &str = "blog_rss_bot";

const MAX_REDIRECTS: u32 = 10;

pub fn build(config: &Config) -> Result<HttpClient, isahc::Error> {
    HttpClient::builder()
        .redirect_policy(RedirectPolicy::Limit(MAX_REDIRECTS))
        .timeout(request_timeout(config))
        .default_header("User-Agent", USER_AGENT)
        .build()
}

fn request_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.request_timeout_in_seconds)
}
