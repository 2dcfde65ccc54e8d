use crate::db::{PostStore, StoreError};
use crate::deliver::{DeliveryError, Notify};
use crate::models::NewBlogPost;
use crate::sync::reader::{FetchError, ReadFeed};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub first_run: bool,
    pub new_posts: usize,
}

impl SyncReport {
    pub fn summary(&self) -> String {
        if self.first_run {
            format!(
                "First run completed - stored {} existing posts.",
                self.new_posts
            )
        } else if self.new_posts == 0 {
            "No new posts found.".to_string()
        } else {
            format!("Processed {} new posts.", self.new_posts)
        }
    }
}

pub struct SyncJob<R, S, N> {
    reader: R,
    store: S,
    notifier: N,
}

impl<R, S, N> SyncJob<R, S, N>
where
    R: ReadFeed,
    S: PostStore,
    N: Notify,
{
    pub fn new(reader: R, store: S, notifier: N) -> Self {
        Self {
            reader,
            store,
            notifier,
        }
    }

    pub fn execute(&self) -> Result<SyncReport, SyncError> {
        log::info!("Starting RSS bot sync");

        let entries = self.reader.read()?;
        let stored_posts = self.store.list_posts()?;

        let first_run = stored_posts.is_empty();

        if first_run {
            log::info!("First run detected - sending setup notification");

            self.notifier.notify_setup_complete()?;
        }

        let mut known_guids: HashSet<String> =
            stored_posts.into_iter().map(|post| post.guid).collect();

        let mut new_posts = 0;

        for entry in &entries {
            let guid = entry.identifier();

            if known_guids.contains(guid) {
                continue;
            }

            log::info!("New post found: {}", entry.title);

            let stored_post = self.store.insert_post(&NewBlogPost::from(entry))?;
            known_guids.insert(guid.to_string());

            // the backlog found on the first run is stored silently
            if !first_run {
                self.notifier.notify_new_post(&stored_post)?;
            }

            new_posts += 1;
        }

        let report = SyncReport {
            first_run,
            new_posts,
        };

        log::info!("{}", report.summary());

        Ok(report)
    }
}
