use crate::models::BlogPost;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use typed_builder::TypedBuilder as Builder;

pub const MAX_DESCRIPTION_CHARS: usize = 300;
pub const ELLIPSIS: &str = "...";

pub const NEW_POST_COLOR: u32 = 5814783;
pub const SETUP_COLOR: u32 = 3066993;

const FOOTER: &str = "Naver Blog RSS Bot";
const SETUP_FOOTER: &str = "Naver Blog RSS Bot - Setup Complete";
const SETUP_TITLE: &str = "🚀 RSS Bot Setup Complete!";
const SETUP_DESCRIPTION: &str = "RSS bot has been successfully configured and is now monitoring the blog feed.\n\nNew posts will be announced here as soon as they are published.";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Builder, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    #[builder(setter(into))]
    pub title: String,
    #[builder(setter(into), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[builder(setter(into))]
    pub description: String,
    pub color: u32,
    #[builder(setter(into))]
    pub timestamp: String,
    pub footer: EmbedFooter,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
}

impl From<Embed> for WebhookPayload {
    fn from(embed: Embed) -> Self {
        WebhookPayload {
            embeds: vec![embed],
        }
    }
}

pub fn new_post_embed(post: &BlogPost) -> Embed {
    let description = post.description.as_deref().unwrap_or_default();

    Embed::builder()
        .title(post.title.clone())
        .url(Some(post.link.clone()))
        .description(truncate(description, MAX_DESCRIPTION_CHARS))
        .color(NEW_POST_COLOR)
        .timestamp(format_timestamp(&post.published_date))
        .footer(footer(FOOTER))
        .build()
}

pub fn setup_embed(now: DateTime<Utc>) -> Embed {
    Embed::builder()
        .title(SETUP_TITLE)
        .description(SETUP_DESCRIPTION)
        .color(SETUP_COLOR)
        .timestamp(format_timestamp(&now))
        .footer(footer(SETUP_FOOTER))
        .build()
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => String::from(s),
        Some((idx, _)) => {
            let mut string = String::from(&s[..idx]);

            string.push_str(ELLIPSIS);

            string
        }
    }
}

fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn footer(text: &str) -> EmbedFooter {
    EmbedFooter {
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlogPost;
    use chrono::DateTime;
    use serde_json::json;

    fn post(description: Option<String>) -> BlogPost {
        BlogPost {
            id: Some(1),
            title: "Kimchi recipe".to_string(),
            link: "https://blog.naver.com/someblog/2".to_string(),
            published_date: DateTime::parse_from_rfc3339("2024-10-18T00:30:00Z")
                .unwrap()
                .into(),
            description,
            guid: "guid-2".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn it_truncates_long_description() {
        let description = "a".repeat(350);

        let embed = new_post_embed(&post(Some(description)));

        assert_eq!(embed.description, format!("{}...", "a".repeat(300)));
    }

    #[test]
    fn it_keeps_short_description() {
        let description = "b".repeat(200);

        let embed = new_post_embed(&post(Some(description.clone())));

        assert_eq!(embed.description, description);
    }

    #[test]
    fn it_does_not_truncate_exactly_max_chars() {
        let description = "c".repeat(300);

        assert_eq!(truncate(&description, MAX_DESCRIPTION_CHARS), description);
    }

    #[test]
    fn it_counts_characters_not_bytes() {
        let description = "가".repeat(301);

        let truncated = truncate(&description, MAX_DESCRIPTION_CHARS);

        assert_eq!(truncated, format!("{}...", "가".repeat(300)));
    }

    #[test]
    fn it_renders_new_post_payload() {
        let payload = WebhookPayload::from(new_post_embed(&post(None)));

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "embeds": [{
                    "title": "Kimchi recipe",
                    "url": "https://blog.naver.com/someblog/2",
                    "description": "",
                    "color": 5814783,
                    "timestamp": "2024-10-18T00:30:00.000Z",
                    "footer": { "text": "Naver Blog RSS Bot" }
                }]
            })
        );
    }

    #[test]
    fn it_renders_setup_payload_without_url() {
        let now = DateTime::parse_from_rfc3339("2024-10-18T00:30:00Z")
            .unwrap()
            .into();

        let value = serde_json::to_value(WebhookPayload::from(setup_embed(now))).unwrap();
        let embed = &value["embeds"][0];

        assert_eq!(embed["title"], "🚀 RSS Bot Setup Complete!");
        assert_eq!(embed["color"], 3066993);
        assert_eq!(embed["footer"]["text"], "Naver Blog RSS Bot - Setup Complete");
        assert!(embed.get("url").is_none());
    }
}
