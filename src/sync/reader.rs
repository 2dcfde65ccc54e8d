use chrono::prelude::*;
use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Feed};
use feed_rs::parser;
use isahc::prelude::*;
use isahc::{HttpClient, Request};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to request feed: {msg}")]
    Http { msg: String },

    #[error("feed responded with status {code}")]
    Status { code: u16 },

    #[error("failed to parse feed: {msg}")]
    Parse { msg: String },
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published_date: DateTime<Utc>,
    pub description: String,
    pub guid: Option<String>,
}

impl FeedEntry {
    pub fn identifier(&self) -> &str {
        self.guid.as_deref().unwrap_or(&self.link)
    }

    fn from_entry(entry: Entry) -> Option<Self> {
        let link = entry
            .links
            .first()
            .map(|link| link.href.clone())
            .unwrap_or_default();
        let guid = Some(entry.id.trim().to_string()).filter(|id| !id.is_empty());

        if guid.is_none() && link.is_empty() {
            log::warn!(
                "Skipping feed entry without guid and link: {:?}",
                entry.title.map(|text| text.content)
            );

            return None;
        }

        let description = entry
            .summary
            .map(|text| text.content)
            .or_else(|| entry.content.and_then(|content| content.body))
            .map(|html| plain_text(&html))
            .unwrap_or_default();

        Some(FeedEntry {
            title: entry.title.map_or_else(String::new, |text| text.content),
            link,
            published_date: parse_time(entry.published, entry.updated),
            description,
            guid,
        })
    }
}

#[cfg_attr(test, automock)]
pub trait ReadFeed {
    fn read(&self) -> Result<Vec<FeedEntry>, FetchError>;
}

pub struct FeedFetcher {
    pub url: String,
    pub http_client: HttpClient,
}

impl FeedFetcher {
    pub fn new(url: String, http_client: HttpClient) -> Self {
        Self { url, http_client }
    }

    fn read_url(&self) -> Result<Vec<u8>, FetchError> {
        let request = Request::get(&self.url)
            .body(())
            .map_err(|error| FetchError::Http {
                msg: format!("{error:?}"),
            })?;

        let mut response = self
            .http_client
            .send(request)
            .map_err(|error| FetchError::Http {
                msg: format!("{error:?}"),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                code: response.status().as_u16(),
            });
        }

        let mut body: Vec<u8> = vec![];

        response
            .copy_to(&mut body)
            .map_err(|error| FetchError::Http {
                msg: format!("{error:?}"),
            })?;

        Ok(body)
    }
}

impl ReadFeed for FeedFetcher {
    fn read(&self) -> Result<Vec<FeedEntry>, FetchError> {
        log::info!("Fetching RSS feed {}", self.url);

        let result = self
            .read_url()
            .and_then(|body| parse_entries(&body));

        if let Err(error) = &result {
            log::error!("Error fetching RSS feed {}: {error}", self.url);
        }

        result
    }
}

pub fn parse_entries(data: &[u8]) -> Result<Vec<FeedEntry>, FetchError> {
    // Entries without a feed-provided id keep an empty id instead of a generated one.
    let parser = parser::Builder::new()
        .id_generator(|_links, _title, _uri| String::new())
        .build();

    match parser.parse(data) {
        Ok(feed) => Ok(entries_from_feed(feed)),
        Err(err) => Err(FetchError::Parse {
            msg: format!("{err:?}"),
        }),
    }
}

fn entries_from_feed(feed: Feed) -> Vec<FeedEntry> {
    feed.entries
        .into_iter()
        .filter_map(FeedEntry::from_entry)
        .collect()
}

fn plain_text(html: &str) -> String {
    nanohtml2text::html2text(html).trim().to_string()
}

fn parse_time(pub_date: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match pub_date {
        None => match updated {
            Some(value) => value,
            None => Utc::now().round_subsecs(0),
        },
        Some(value) => value,
    }
}
