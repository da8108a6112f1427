use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::images::resolve_image_url;
use super::query::CatalogQuery;
use crate::config::EvConfig;
use crate::error::{EvError, Result};
use crate::model::{CatalogEntry, Color, Event, Manufacturer, NewsArticle, ServiceBooking};

/// List endpoints answer with either a bare array or a paginated envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Page { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Page { results } => results,
            Listing::Plain(items) => items,
        }
    }
}

/// Response to a successful service booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// HTTP client for the storefront REST API.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    image_base_url: String,
}

impl CatalogClient {
    pub fn new(config: &EvConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url().to_string(),
            image_base_url: config.image_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn image_url(&self, path: &str) -> Option<String> {
        resolve_image_url(&self.image_base_url, path)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<T>> {
        let url = self.endpoint(path);
        tracing::debug!(%url, params = query.len(), "GET");

        let response = self.client.get(&url).query(query).send().await?;
        let listing: Listing<T> = read_json(response).await?;
        Ok(listing.into_vec())
    }

    /// `GET /cars/electric-cars/`
    pub async fn list_cars(&self, query: &CatalogQuery) -> Result<Vec<CatalogEntry>> {
        self.get_list("cars/electric-cars/", &query.to_query_pairs())
            .await
    }

    /// `GET /cars/car-manufacturer/`
    pub async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>> {
        self.get_list("cars/car-manufacturer/", &[]).await
    }

    /// `GET /cars/colors/`
    pub async fn list_colors(&self) -> Result<Vec<Color>> {
        self.get_list("cars/colors/", &[]).await
    }

    /// `GET /company/events/`
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.get_list("company/events/", &[]).await
    }

    /// `GET /company/news/`
    pub async fn list_news(&self) -> Result<Vec<NewsArticle>> {
        self.get_list("company/news/", &[]).await
    }

    /// `POST /cars/public/book-service/`
    pub async fn book_service(&self, booking: &ServiceBooking) -> Result<BookingConfirmation> {
        let url = self.endpoint("cars/public/book-service/");
        tracing::debug!(%url, "POST");

        let response = self.client.post(&url).json(booking).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(api_error(response).await);
        }
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(BookingConfirmation::default());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: reqwest::Response) -> EvError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    EvError::Api { status, body }
}
