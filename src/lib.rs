pub mod config;
pub mod db;
pub mod deliver;
pub mod http_client;
pub mod models;
pub mod sync;

pub use config::Config;
