use crate::models::{BlogPost, NewBlogPost};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

pub mod blog_posts;

pub use blog_posts::RestStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to reach the store: {msg}")]
    Http { msg: String },

    #[error("store responded with status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("failed to decode store response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store returned no rows for the inserted post")]
    EmptyResponse,
}

impl From<isahc::Error> for StoreError {
    fn from(error: isahc::Error) -> Self {
        let msg = format!("{error:?}");

        StoreError::Http { msg }
    }
}

impl From<isahc::http::Error> for StoreError {
    fn from(error: isahc::http::Error) -> Self {
        let msg = format!("{error:?}");

        StoreError::Http { msg }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        let msg = format!("{error:?}");

        StoreError::Http { msg }
    }
}

#[cfg_attr(test, automock)]
pub trait PostStore {
    /// All stored posts, newest `published_date` first.
    fn list_posts(&self) -> Result<Vec<BlogPost>, StoreError>;

    /// Appends a single row. The caller makes sure `guid` is not stored yet.
    fn insert_post(&self, post: &NewBlogPost) -> Result<BlogPost, StoreError>;
}
