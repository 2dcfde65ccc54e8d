use crate::models::BlogPost;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

pub mod discord_client;
pub mod render_message;

pub use discord_client::DiscordNotifier;
pub use render_message::{Embed, EmbedFooter, WebhookPayload};

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to reach the webhook: {msg}")]
    Http { msg: String },

    #[error("Discord webhook failed: {0}")]
    Status(u16),

    #[error("failed to encode webhook payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<isahc::Error> for DeliveryError {
    fn from(error: isahc::Error) -> Self {
        let msg = format!("{error:?}");

        DeliveryError::Http { msg }
    }
}

impl From<isahc::http::Error> for DeliveryError {
    fn from(error: isahc::http::Error) -> Self {
        let msg = format!("{error:?}");

        DeliveryError::Http { msg }
    }
}

#[cfg_attr(test, automock)]
pub trait Notify {
    fn notify_new_post(&self, post: &BlogPost) -> Result<(), DeliveryError>;

    fn notify_setup_complete(&self) -> Result<(), DeliveryError>;
}
