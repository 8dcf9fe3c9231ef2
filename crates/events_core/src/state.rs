//! Query parameters and the result of the latest fetch attempt, mutated only
//! through [`EventsState::apply`].

use shared::domain::{Event, OrganizationId, PerPage};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query {
    pub organization_id: OrganizationId,
    pub page: u32,
    pub per_page: PerPage,
}

impl Query {
    pub fn first_page(organization_id: OrganizationId) -> Self {
        Self {
            organization_id,
            page: 1,
            per_page: PerPage::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventsPage {
    pub count: u64,
    pub page_count: u32,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Pending,
    Loaded(EventsPage),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    SetPage(u32),
    SetOrganization(OrganizationId),
    SetPerPage(PerPage),
    FetchSucceeded {
        for_query: Query,
        count: u64,
        events: Vec<Event>,
    },
    FetchFailed {
        for_query: Query,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    /// The transition would not change anything, state left as is.
    Unchanged,
    /// A fetch result for a query that is no longer live.
    Stale,
    /// Precondition violated (page 0).
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventsState {
    query: Query,
    outcome: FetchOutcome,
    loaded_revision: u64,
}

impl EventsState {
    pub fn new(organization_id: OrganizationId) -> Self {
        Self::with_query(Query::first_page(organization_id))
    }

    pub fn with_query(query: Query) -> Self {
        Self {
            query,
            outcome: FetchOutcome::Pending,
            loaded_revision: 0,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn outcome(&self) -> &FetchOutcome {
        &self.outcome
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Pending)
    }

    /// Loaded events, if the latest fetch succeeded.
    pub fn events(&self) -> Option<&[Event]> {
        match &self.outcome {
            FetchOutcome::Loaded(page) => Some(&page.events),
            _ => None,
        }
    }

    pub fn page_count(&self) -> u32 {
        match &self.outcome {
            FetchOutcome::Loaded(page) => page.page_count,
            _ => 0,
        }
    }

    /// Advances every time the loaded event sequence changes.
    pub fn loaded_revision(&self) -> u64 {
        self.loaded_revision
    }

    pub fn apply(&mut self, transition: Transition) -> TransitionOutcome {
        match transition {
            Transition::SetPage(page) => {
                if page == 0 {
                    warn!(page, "rejected page change: pages start at 1");
                    return TransitionOutcome::Rejected;
                }
                if page == self.query.page {
                    return TransitionOutcome::Unchanged;
                }
                self.restart(Query { page, ..self.query })
            }
            Transition::SetOrganization(organization_id) => {
                if organization_id == self.query.organization_id {
                    return TransitionOutcome::Unchanged;
                }
                self.restart(Query {
                    organization_id,
                    page: 1,
                    ..self.query
                })
            }
            Transition::SetPerPage(per_page) => {
                if per_page == self.query.per_page {
                    return TransitionOutcome::Unchanged;
                }
                self.restart(Query {
                    page: 1,
                    per_page,
                    ..self.query
                })
            }
            Transition::FetchSucceeded {
                for_query,
                count,
                events,
            } => {
                if !self.accepts_result_for(&for_query) {
                    return TransitionOutcome::Stale;
                }
                let page_count = page_count(count, self.query.per_page);
                info!(
                    organization_id = %self.query.organization_id,
                    page = self.query.page,
                    count,
                    page_count,
                    events = events.len(),
                    "events page loaded"
                );
                self.set_outcome(FetchOutcome::Loaded(EventsPage {
                    count,
                    page_count,
                    events,
                }));
                TransitionOutcome::Applied
            }
            Transition::FetchFailed { for_query, message } => {
                if !self.accepts_result_for(&for_query) {
                    return TransitionOutcome::Stale;
                }
                warn!(
                    organization_id = %self.query.organization_id,
                    page = self.query.page,
                    %message,
                    "events page failed to load"
                );
                self.set_outcome(FetchOutcome::Failed { message });
                TransitionOutcome::Applied
            }
        }
    }

    fn accepts_result_for(&self, for_query: &Query) -> bool {
        if *for_query != self.query || !self.is_pending() {
            debug!(
                stale_page = for_query.page,
                live_page = self.query.page,
                "discarding stale events result"
            );
            return false;
        }
        true
    }

    fn restart(&mut self, query: Query) -> TransitionOutcome {
        self.query = query;
        self.set_outcome(FetchOutcome::Pending);
        TransitionOutcome::Applied
    }

    fn set_outcome(&mut self, outcome: FetchOutcome) {
        let loaded_changed = matches!(self.outcome, FetchOutcome::Loaded(_))
            || matches!(outcome, FetchOutcome::Loaded(_));
        if loaded_changed {
            self.loaded_revision += 1;
        }
        self.outcome = outcome;
    }
}

/// `ceil(count / per_page)`, saturating at `u32::MAX`.
pub fn page_count(count: u64, per_page: PerPage) -> u32 {
    let pages = count.div_ceil(u64::from(per_page.as_u32()));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
