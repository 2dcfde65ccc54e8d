use super::render_message::{new_post_embed, setup_embed, WebhookPayload};
use super::{DeliveryError, Notify};
use crate::models::BlogPost;
use chrono::Utc;
use isahc::{HttpClient, Request};

pub struct DiscordNotifier {
    pub webhook_url: String,
    pub http_client: HttpClient,
}

impl DiscordNotifier {
    pub fn new(webhook_url: String, http_client: HttpClient) -> Self {
        Self {
            webhook_url,
            http_client,
        }
    }

    pub fn send_payload(&self, payload: &WebhookPayload) -> Result<(), DeliveryError> {
        let json = serde_json::to_string(payload)?;

        let request = Request::post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .body(json)?;

        let response = self.http_client.send(request)?;

        if !response.status().is_success() {
            return Err(DeliveryError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}

impl Notify for DiscordNotifier {
    fn notify_new_post(&self, post: &BlogPost) -> Result<(), DeliveryError> {
        let payload = WebhookPayload::from(new_post_embed(post));

        match self.send_payload(&payload) {
            Ok(()) => {
                log::info!("Discord notification sent for: {}", post.title);
                Ok(())
            }
            Err(error) => {
                log::error!("Error sending Discord notification for {}: {error}", post.guid);
                Err(error)
            }
        }
    }

    fn notify_setup_complete(&self) -> Result<(), DeliveryError> {
        let payload = WebhookPayload::from(setup_embed(Utc::now()));

        match self.send_payload(&payload) {
            Ok(()) => {
                log::info!("Setup notification sent to Discord");
                Ok(())
            }
            Err(error) => {
                log::error!("Error sending setup notification: {error}");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DiscordNotifier;
    use crate::deliver::{DeliveryError, Notify};
    use crate::models::BlogPost;
    use chrono::DateTime;
    use isahc::HttpClient;
    use mockito::Matcher;
    use serde_json::json;

    fn notifier(server: &mockito::Server) -> DiscordNotifier {
        DiscordNotifier::new(
            format!("{}/api/webhooks/1/token", server.url()),
            HttpClient::new().unwrap(),
        )
    }

    fn post() -> BlogPost {
        BlogPost {
            id: Some(3),
            title: "Autumn hiking notes".to_string(),
            link: "https://blog.naver.com/someblog/3".to_string(),
            published_date: DateTime::parse_from_rfc3339("2024-10-19T06:09:11Z")
                .unwrap()
                .into(),
            description: Some("Leaves were already turning on the ridge.".to_string()),
            guid: "guid-3".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn it_posts_new_post_embed() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/webhooks/1/token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "embeds": [{
                    "title": "Autumn hiking notes",
                    "url": "https://blog.naver.com/someblog/3",
                    "description": "Leaves were already turning on the ridge.",
                    "color": 5814783,
                    "timestamp": "2024-10-19T06:09:11.000Z",
                    "footer": { "text": "Naver Blog RSS Bot" }
                }]
            })))
            .with_status(204)
            .create();

        notifier(&server).notify_new_post(&post()).unwrap();

        mock.assert();
    }

    #[test]
    fn it_posts_setup_embed() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/webhooks/1/token")
            .match_body(Matcher::PartialJson(json!({
                "embeds": [{
                    "title": "🚀 RSS Bot Setup Complete!",
                    "color": 3066993,
                    "footer": { "text": "Naver Blog RSS Bot - Setup Complete" }
                }]
            })))
            .with_status(204)
            .create();

        notifier(&server).notify_setup_complete().unwrap();

        mock.assert();
    }

    #[test]
    fn it_fails_on_non_success_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/webhooks/1/token")
            .with_status(429)
            .create();

        let result = notifier(&server).notify_new_post(&post());

        assert!(matches!(result, Err(DeliveryError::Status(429))));
    }
}
