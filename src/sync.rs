pub mod reader;
pub mod sync_job;

pub use reader::{FeedEntry, FeedFetcher, FetchError, ReadFeed};
pub use sync_job::{SyncError, SyncJob, SyncReport};
