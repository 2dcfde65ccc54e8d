use blog_rss_bot::db::RestStore;
use blog_rss_bot::deliver::DiscordNotifier;
use blog_rss_bot::http_client;
use blog_rss_bot::sync::{FeedFetcher, SyncJob};
use blog_rss_bot::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };

    let http_client = match http_client::build(&config) {
        Ok(client) => client,
        Err(error) => {
            log::error!("Failed to build http client: {error:?}");
            return ExitCode::FAILURE;
        }
    };

    let reader = FeedFetcher::new(config.feed_url.clone(), http_client.clone());
    let store = RestStore::new(
        &config.store_url,
        &config.store_table,
        &config.store_credential,
        http_client.clone(),
    );
    let notifier = DiscordNotifier::new(config.webhook_url.clone(), http_client);

    match SyncJob::new(reader, store, notifier).execute() {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("Sync failed: {error}");
            ExitCode::FAILURE
        }
    }
}
