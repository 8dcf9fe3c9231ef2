use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use shared::{
    domain::{Coordinate, Event, EventId, Location},
    protocol::{ListEventsRequest, ListEventsResponse},
};
use tokio::sync::{oneshot, Mutex};

use crate::{error::FetchError, orchestrator::EventsSource};

type Reply = Result<ListEventsResponse, FetchError>;

/// Source whose replies are held back per page until the test releases them.
/// Pages without a gate answer immediately with an empty listing.
#[derive(Clone, Default)]
pub struct GatedSource {
    pub requests: Arc<Mutex<Vec<ListEventsRequest>>>,
    gates: Arc<Mutex<HashMap<u32, oneshot::Receiver<Reply>>>>,
}

impl GatedSource {
    pub async fn gate(&self, page: u32) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.insert(page, rx);
        tx
    }

    pub async fn requested_pages(&self) -> Vec<u32> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|request| request.page)
            .collect()
    }
}

#[async_trait]
impl EventsSource for GatedSource {
    async fn list_events(&self, request: &ListEventsRequest) -> Reply {
        self.requests.lock().await.push(request.clone());
        let gate = self.gates.lock().await.remove(&request.page);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Aborted("gate dropped".into()))),
            None => Ok(listing(0, Vec::new())),
        }
    }
}

pub fn listing(count: u64, data: Vec<Event>) -> ListEventsResponse {
    ListEventsResponse {
        count,
        next: None,
        previous: None,
        data,
    }
}

pub fn located_event(id: i64, title: &str, coordinate: Option<(f64, f64)>) -> Event {
    Event {
        id: EventId(id),
        title: title.to_string(),
        image_url: None,
        summary: None,
        description: None,
        location: Some(Location {
            venue: Some(format!("venue {id}")),
            coordinate: coordinate.map(|(latitude, longitude)| Coordinate {
                latitude,
                longitude,
            }),
            ..Location::default()
        }),
    }
}
