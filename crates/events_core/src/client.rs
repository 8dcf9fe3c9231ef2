//! HTTP rendition of the events-listing collaborator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::OrganizationId,
    error::ApiError,
    protocol::{ListEventsRequest, ListEventsResponse},
};
use tracing::debug;
use url::Url;

use crate::{error::FetchError, orchestrator::EventsSource};

pub const DEFAULT_API_BASE_URL: &str = "https://api.mobilize.us/v1";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct EventsClient {
    http: Client,
    base_url: Url,
}

impl EventsClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        // Relative joins replace the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn events_url(&self, organization_id: OrganizationId) -> Result<Url, FetchError> {
        Ok(self
            .base_url
            .join(&format!("organizations/{}/events", organization_id.0))?)
    }
}

#[async_trait]
impl EventsSource for EventsClient {
    async fn list_events(
        &self,
        request: &ListEventsRequest,
    ) -> Result<ListEventsResponse, FetchError> {
        let url = self.events_url(request.organization_id)?;
        debug!(%url, page = request.page, per_page = %request.per_page, "GET events");

        let response = self
            .http
            .get(url)
            .query(&request.query_pairs())
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let mut message = ApiError::from_body(&body).describe();
            if message.is_empty() {
                message = status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string();
            }
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
