//! The explicit state object shared by the front end: every mutation goes
//! through [`EventsSession::dispatch`], which then lets the orchestrator and
//! the marker sync react to the new state.

use shared::domain::{OrganizationId, PerPage};
use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    markers::{MapMarkerSync, MapSurface, Marker},
    orchestrator::{EventsSource, FetchOrchestrator},
    page_window::PaginationControl,
    state::{EventsState, Query, Transition, TransitionOutcome},
};

pub struct EventsSession<S: EventsSource, M: MapSurface> {
    state: EventsState,
    orchestrator: FetchOrchestrator<S>,
    completions: mpsc::UnboundedReceiver<Transition>,
    markers: MapMarkerSync,
    map: M,
}

impl<S: EventsSource, M: MapSurface> EventsSession<S, M> {
    /// Starts on page 1 of `organization_id` with the default page size and
    /// issues the first fetch.
    pub fn start(organization_id: OrganizationId, source: S, map: M) -> Self {
        Self::start_with_query(Query::first_page(organization_id), source, map)
    }

    pub fn start_with_query(query: Query, source: S, map: M) -> Self {
        let (orchestrator, completions) = FetchOrchestrator::new(source);
        let mut session = Self {
            state: EventsState::with_query(query),
            orchestrator,
            completions,
            markers: MapMarkerSync::new(),
            map,
        };
        session.react();
        session
    }

    pub fn state(&self) -> &EventsState {
        &self.state
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn markers(&self) -> &[Marker] {
        self.markers.displayed()
    }

    pub fn fetches_issued(&self) -> u64 {
        self.orchestrator.issued()
    }

    pub fn pagination(&self) -> PaginationControl {
        PaginationControl::new(self.state.query().page, self.state.page_count())
    }

    pub fn dispatch(&mut self, transition: Transition) -> TransitionOutcome {
        let outcome = self.state.apply(transition);
        if outcome == TransitionOutcome::Applied {
            self.react();
        }
        outcome
    }

    pub fn go_to_page(&mut self, page: u32) -> TransitionOutcome {
        self.dispatch(Transition::SetPage(page))
    }

    /// Follows the "previous" control; rejected while it is disabled.
    pub fn previous_page(&mut self) -> TransitionOutcome {
        match self.pagination().previous() {
            Some(page) => self.go_to_page(page),
            None => {
                debug!("previous page control is disabled");
                TransitionOutcome::Rejected
            }
        }
    }

    /// Follows the "next" control; rejected while it is disabled.
    pub fn next_page(&mut self) -> TransitionOutcome {
        match self.pagination().next() {
            Some(page) => self.go_to_page(page),
            None => {
                debug!("next page control is disabled");
                TransitionOutcome::Rejected
            }
        }
    }

    pub fn set_organization(&mut self, organization_id: OrganizationId) -> TransitionOutcome {
        self.dispatch(Transition::SetOrganization(organization_id))
    }

    pub fn set_per_page(&mut self, per_page: PerPage) -> TransitionOutcome {
        self.dispatch(Transition::SetPerPage(per_page))
    }

    /// Waits for the next fetch to finish and applies it.
    pub async fn next_completion(&mut self) -> Option<TransitionOutcome> {
        let transition = self.completions.recv().await?;
        Some(self.dispatch(transition))
    }

    fn react(&mut self) {
        self.orchestrator.observe(self.state.query());
        self.markers.sync(
            self.state.events(),
            self.state.loaded_revision(),
            &mut self.map,
        );
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
