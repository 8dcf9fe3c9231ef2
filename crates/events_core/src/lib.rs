//! Client-side coordination for browsing an organization's events: the
//! pagination window, the load state machine, fetch orchestration and map
//! marker synchronization.

pub mod client;
pub mod error;
pub mod markers;
pub mod orchestrator;
pub mod page_window;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;

pub use client::{EventsClient, DEFAULT_API_BASE_URL};
pub use error::FetchError;
pub use markers::{markers_for, MapMarkerSync, MapSurface, Marker};
pub use orchestrator::{EventsSource, FetchOrchestrator};
pub use page_window::{compute_window, PageWindowEntry, PaginationControl};
pub use session::EventsSession;
pub use state::{EventsPage, EventsState, FetchOutcome, Query, Transition, TransitionOutcome};
