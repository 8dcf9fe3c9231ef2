//! Issues one fetch per distinct [`Query`] and reports completions back as
//! transitions tagged with the query they were issued for.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shared::protocol::{ListEventsRequest, ListEventsResponse};
use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    error::FetchError,
    state::{Query, Transition},
};

/// Events-listing collaborator.
#[async_trait]
pub trait EventsSource: Send + Sync + 'static {
    async fn list_events(
        &self,
        request: &ListEventsRequest,
    ) -> Result<ListEventsResponse, FetchError>;
}

#[async_trait]
impl<S: EventsSource + ?Sized> EventsSource for Arc<S> {
    async fn list_events(
        &self,
        request: &ListEventsRequest,
    ) -> Result<ListEventsResponse, FetchError> {
        (**self).list_events(request).await
    }
}

pub struct FetchOrchestrator<S: EventsSource> {
    source: Arc<S>,
    last_issued: Option<Query>,
    issued: u64,
    completions: mpsc::UnboundedSender<Transition>,
}

impl<S: EventsSource> FetchOrchestrator<S> {
    /// Returns the orchestrator and the receiving end of its completions.
    pub fn new(source: S) -> (Self, mpsc::UnboundedReceiver<Transition>) {
        let (completions, rx) = mpsc::unbounded_channel();
        (
            Self {
                source: Arc::new(source),
                last_issued: None,
                issued: 0,
                completions,
            },
            rx,
        )
    }

    /// Number of fetches issued so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Issues a fetch when `query` differs from the last issued one.
    pub fn observe(&mut self, query: &Query) -> bool {
        if self.last_issued.as_ref() == Some(query) {
            return false;
        }
        self.last_issued = Some(*query);
        self.issue(*query);
        true
    }

    fn issue(&mut self, query: Query) {
        self.issued += 1;
        let request = ListEventsRequest {
            organization_id: query.organization_id,
            page: query.page,
            per_page: query.per_page,
            ends_after: Utc::now(),
        };
        debug!(
            organization_id = %query.organization_id,
            page = query.page,
            per_page = %query.per_page,
            "issuing events fetch"
        );

        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let fetch = tokio::spawn(async move { source.list_events(&request).await });
            let result = match fetch.await {
                Ok(result) => result,
                Err(err) => Err(FetchError::Aborted(err.to_string())),
            };
            let transition = match result {
                Ok(listing) => Transition::FetchSucceeded {
                    for_query: query,
                    count: listing.count,
                    events: listing.data,
                },
                Err(err) => Transition::FetchFailed {
                    for_query: query,
                    message: err.to_string(),
                },
            };
            if completions.send(transition).is_err() {
                debug!(page = query.page, "events session closed before fetch completed");
            }
        });
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
