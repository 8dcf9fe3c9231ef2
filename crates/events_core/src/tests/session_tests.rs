use std::time::Duration;

use shared::domain::{EventId, OrganizationId, PerPage};

use super::*;
use crate::{
    page_window::PageWindowEntry,
    state::FetchOutcome,
    test_support::{listing, located_event, GatedSource},
};

#[derive(Default)]
struct TestMap {
    clears: usize,
    markers: Vec<Marker>,
}

impl MapSurface for TestMap {
    fn clear_markers(&mut self) {
        self.clears += 1;
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.markers.push(marker.clone());
    }
}

async fn settle<S: EventsSource>(session: &mut EventsSession<S, TestMap>) -> TransitionOutcome {
    tokio::time::timeout(Duration::from_secs(5), session.next_completion())
        .await
        .expect("completion in time")
        .expect("session open")
}

#[tokio::test]
async fn start_issues_initial_fetch_and_loads() {
    let source = GatedSource::default();
    let gate = source.gate(1).await;
    let mut session = EventsSession::start(OrganizationId(8), source.clone(), TestMap::default());
    assert!(session.state().is_pending());
    assert_eq!(session.fetches_issued(), 1);

    gate.send(Ok(listing(
        25,
        vec![
            located_event(1, "march", Some((10.0, 20.0))),
            located_event(2, "webinar", None),
        ],
    )))
    .expect("release");

    assert_eq!(settle(&mut session).await, TransitionOutcome::Applied);
    assert_eq!(session.state().page_count(), 3);
    assert_eq!(session.markers().len(), 1);
    assert_eq!(session.map().markers.len(), 1);
    assert_eq!(session.map().markers[0].title, "march");
    assert_eq!(
        session.pagination().entries(),
        &[
            PageWindowEntry::Page(1),
            PageWindowEntry::Page(2),
            PageWindowEntry::Page(3)
        ]
    );
}

#[tokio::test]
async fn stale_page_result_never_replaces_newer_page() {
    let source = GatedSource::default();
    let first = source.gate(1).await;
    let mut session = EventsSession::start(OrganizationId(1), source.clone(), TestMap::default());
    first
        .send(Ok(listing(100, vec![located_event(10, "p1", Some((1.0, 1.0)))])))
        .expect("release");
    settle(&mut session).await;

    let page_two = source.gate(2).await;
    let page_three = source.gate(3).await;
    assert_eq!(session.go_to_page(2), TransitionOutcome::Applied);
    assert_eq!(session.go_to_page(3), TransitionOutcome::Applied);

    page_two
        .send(Ok(listing(100, vec![located_event(20, "p2", Some((2.0, 2.0)))])))
        .expect("release");
    assert_eq!(settle(&mut session).await, TransitionOutcome::Stale);
    assert_eq!(session.state().query().page, 3);
    assert_eq!(*session.state().outcome(), FetchOutcome::Pending);
    assert!(session.map().markers.is_empty());

    page_three
        .send(Ok(listing(100, vec![located_event(30, "p3", Some((3.0, 3.0)))])))
        .expect("release");
    assert_eq!(settle(&mut session).await, TransitionOutcome::Applied);
    assert_eq!(
        session.state().events().map(|events| events[0].id),
        Some(EventId(30))
    );
    assert_eq!(session.map().markers[0].title, "p3");
    let mut pages = source.requested_pages().await;
    pages.sort_unstable();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[tokio::test]
async fn repeated_page_does_not_refetch() {
    let source = GatedSource::default();
    let mut session = EventsSession::start(OrganizationId(1), source.clone(), TestMap::default());
    settle(&mut session).await;

    assert_eq!(session.go_to_page(1), TransitionOutcome::Unchanged);
    assert_eq!(session.fetches_issued(), 1);
}

#[tokio::test]
async fn markers_sync_once_per_loaded_change() {
    let source = GatedSource::default();
    let mut session = EventsSession::start(OrganizationId(1), source.clone(), TestMap::default());
    // Initial sync clears the empty map once.
    assert_eq!(session.map().clears, 1);

    settle(&mut session).await;
    assert_eq!(session.map().clears, 2);

    // Same page again: nothing changes, map untouched.
    session.go_to_page(1);
    assert_eq!(session.map().clears, 2);

    // Leaving the loaded page clears the markers.
    let gate = source.gate(2).await;
    session.dispatch(Transition::SetPage(2));
    assert_eq!(session.map().clears, 3);

    gate.send(Err(crate::error::FetchError::Aborted("offline".into())))
        .expect("release");
    settle(&mut session).await;
    assert_eq!(session.map().clears, 3);
    assert!(matches!(
        session.state().outcome(),
        FetchOutcome::Failed { message } if message.contains("offline")
    ));
}

#[tokio::test]
async fn previous_and_next_respect_disabled_controls() {
    let source = GatedSource::default();
    let gate = source.gate(1).await;
    let mut session = EventsSession::start(OrganizationId(1), source.clone(), TestMap::default());

    // Nothing loaded yet: both disabled.
    assert_eq!(session.next_page(), TransitionOutcome::Rejected);
    assert_eq!(session.previous_page(), TransitionOutcome::Rejected);

    gate.send(Ok(listing(20, Vec::new()))).expect("release");
    settle(&mut session).await;

    assert_eq!(session.previous_page(), TransitionOutcome::Rejected);
    let gate = source.gate(2).await;
    assert_eq!(session.next_page(), TransitionOutcome::Applied);
    assert_eq!(session.state().query().page, 2);

    gate.send(Ok(listing(20, Vec::new()))).expect("release");
    settle(&mut session).await;
    assert_eq!(session.next_page(), TransitionOutcome::Rejected);
    assert_eq!(session.previous_page(), TransitionOutcome::Applied);
    assert_eq!(session.state().query().page, 1);
}

#[tokio::test]
async fn organization_and_size_changes_refetch_from_first_page() {
    let source = GatedSource::default();
    let mut session = EventsSession::start(OrganizationId(1), source.clone(), TestMap::default());
    settle(&mut session).await;

    assert_eq!(
        session.set_organization(OrganizationId(2)),
        TransitionOutcome::Applied
    );
    settle(&mut session).await;
    assert_eq!(session.set_per_page(PerPage::Hundred), TransitionOutcome::Applied);
    settle(&mut session).await;

    let requests = source.requests.lock().await;
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].organization_id, OrganizationId(2));
    assert_eq!(requests[2].per_page, PerPage::Hundred);
    assert!(requests.iter().all(|request| request.page == 1));
}
