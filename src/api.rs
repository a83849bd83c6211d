use crate::config::Config;
use crate::error::{api_error, AppResult};
use crate::model::{Event, EventDraft, EventId};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use url::Url;

/// The four remote operations against the `/events` collection.
///
/// A trait so tests can substitute an in-memory implementation for the
/// reqwest-backed client.
#[async_trait]
pub trait EventApi: Send + Sync {
    /// Fetch the full event collection
    async fn get_events(&self) -> AppResult<Vec<Event>>;

    /// Create a new event; the response carries the server-assigned id
    async fn post_event(&self, draft: &EventDraft) -> AppResult<Event>;

    /// Replace the event with the given id
    async fn edit_event(&self, id: EventId, draft: &EventDraft) -> AppResult<Event>;

    /// Delete the event with the given id; the response body is discarded
    async fn remove_event(&self, id: EventId) -> AppResult<()>;
}

/// HTTP implementation of [`EventApi`]
pub struct HttpEventApi {
    config: Arc<RwLock<Config>>,
    client: Client,
}

impl HttpEventApi {
    /// Create a client using the timeout from the shared config
    pub async fn new(config: Arc<RwLock<Config>>) -> AppResult<Self> {
        let timeout = {
            let config_read = config.read().await;
            config_read.request_timeout_secs
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| api_error(&format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    /// URL of the event collection
    async fn events_url(&self) -> AppResult<Url> {
        let base = {
            let config_read = self.config.read().await;
            config_read.api_base_url.clone()
        };
        let url_str = format!("{}/events", base.trim_end_matches('/'));
        Url::parse(&url_str).map_err(|e| api_error(&format!("Failed to parse URL: {}", e)))
    }

    /// URL of a single event resource
    async fn event_url(&self, id: EventId) -> AppResult<Url> {
        let base = {
            let config_read = self.config.read().await;
            config_read.api_base_url.clone()
        };
        let url_str = format!("{}/events/{}", base.trim_end_matches('/'), id);
        Url::parse(&url_str).map_err(|e| api_error(&format!("Failed to parse URL: {}", e)))
    }

    /// Turn a non-2xx response into an error carrying status and body
    async fn check(operation: &str, response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        Err(api_error(&format!(
            "Failed to {}: HTTP {} - {}",
            operation, status, error_body
        )))
    }
}

#[async_trait]
impl EventApi for HttpEventApi {
    async fn get_events(&self) -> AppResult<Vec<Event>> {
        let url = self.events_url().await?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| api_error(&format!("Failed to fetch events: {}", e)))?;
        let response = Self::check("fetch events", response).await?;
        response
            .json::<Vec<Event>>()
            .await
            .map_err(|e| api_error(&format!("Failed to parse events response: {}", e)))
    }

    async fn post_event(&self, draft: &EventDraft) -> AppResult<Event> {
        let url = self.events_url().await?;
        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| api_error(&format!("Failed to create event: {}", e)))?;
        let response = Self::check("create event", response).await?;
        response
            .json::<Event>()
            .await
            .map_err(|e| api_error(&format!("Failed to parse create response: {}", e)))
    }

    async fn edit_event(&self, id: EventId, draft: &EventDraft) -> AppResult<Event> {
        let url = self.event_url(id).await?;
        let response = self
            .client
            .put(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| api_error(&format!("Failed to update event {}: {}", id, e)))?;
        let response = Self::check("update event", response).await?;
        response
            .json::<Event>()
            .await
            .map_err(|e| api_error(&format!("Failed to parse update response: {}", e)))
    }

    async fn remove_event(&self, id: EventId) -> AppResult<()> {
        let url = self.event_url(id).await?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| api_error(&format!("Failed to delete event {}: {}", id, e)))?;
        let response = Self::check("delete event", response).await?;
        // The service may answer with the deleted record or an empty ack;
        // either way the body is irrelevant.
        let _ = response.text().await;
        Ok(())
    }
}
