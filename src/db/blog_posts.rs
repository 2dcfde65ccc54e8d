use super::{PostStore, StoreError};
use crate::models::{BlogPost, NewBlogPost};
use isahc::http::request::Builder;
use isahc::prelude::*;
use isahc::{HttpClient, Request};

pub struct RestStore {
    pub base_url: String,
    pub table: String,
    pub api_key: String,
    pub http_client: HttpClient,
}

impl RestStore {
    pub fn new(base_url: &str, table: &str, api_key: &str, http_client: HttpClient) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn with_auth(&self, builder: Builder) -> Builder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
    }

    fn send<B: Into<isahc::Body>>(&self, request: Request<B>) -> Result<Vec<u8>, StoreError> {
        let mut response = self.http_client.send(request)?;

        let mut bytes = Vec::new();
        response.copy_to(&mut bytes)?;

        if !response.status().is_success() {
            let body = String::from_utf8_lossy(&bytes).to_string();

            return Err(StoreError::Status {
                code: response.status().as_u16(),
                body,
            });
        }

        Ok(bytes)
    }

    fn fetch_posts(&self) -> Result<Vec<BlogPost>, StoreError> {
        let url = format!("{}?select=*&order=published_date.desc", self.table_url());
        let request = self.with_auth(Request::get(url)).body(())?;

        let bytes = self.send(request)?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn create_post(&self, post: &NewBlogPost) -> Result<BlogPost, StoreError> {
        let json = serde_json::to_string(&[post])?;
        let request = self
            .with_auth(Request::post(self.table_url()))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .body(json)?;

        let bytes = self.send(request)?;
        let rows: Vec<BlogPost> = serde_json::from_slice(&bytes)?;

        rows.into_iter().next().ok_or(StoreError::EmptyResponse)
    }
}

impl PostStore for RestStore {
    fn list_posts(&self) -> Result<Vec<BlogPost>, StoreError> {
        match self.fetch_posts() {
            Ok(posts) => Ok(posts),
            Err(error) => {
                log::error!("Error fetching stored posts from {}: {error}", self.table);
                Err(error)
            }
        }
    }

    fn insert_post(&self, post: &NewBlogPost) -> Result<BlogPost, StoreError> {
        match self.create_post(post) {
            Ok(stored_post) => {
                log::info!("Post stored successfully: {}", stored_post.title);
                Ok(stored_post)
            }
            Err(error) => {
                log::error!("Error storing post {}: {error}", post.guid);
                Err(error)
            }
        }
    }
}
