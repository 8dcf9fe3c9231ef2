//! Map markers derived from loaded events.

use shared::domain::{Coordinate, Event};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: String,
    pub venue: Option<String>,
}

impl Marker {
    pub fn from_event(event: &Event) -> Option<Self> {
        Some(Self {
            coordinate: event.coordinate()?,
            title: event.title.clone(),
            venue: event.venue().map(str::to_string),
        })
    }

    /// Content of the marker's popup.
    pub fn popup_text(&self) -> String {
        match &self.venue {
            Some(venue) => format!("{}\n{venue}", self.title),
            None => self.title.clone(),
        }
    }
}

/// Map rendering collaborator.
pub trait MapSurface {
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: &Marker);
}

/// One marker per event with a usable coordinate, in listing order.
pub fn markers_for(events: &[Event]) -> Vec<Marker> {
    events.iter().filter_map(Marker::from_event).collect()
}

#[derive(Debug, Default)]
pub struct MapMarkerSync {
    synced_revision: Option<u64>,
    displayed: Vec<Marker>,
}

impl MapMarkerSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn displayed(&self) -> &[Marker] {
        &self.displayed
    }

    /// Replaces the surface's markers when `revision` has not been synced yet.
    /// Returns whether the surface was touched.
    pub fn sync<M: MapSurface + ?Sized>(
        &mut self,
        loaded: Option<&[Event]>,
        revision: u64,
        surface: &mut M,
    ) -> bool {
        if self.synced_revision == Some(revision) {
            return false;
        }

        let markers = loaded.map(markers_for).unwrap_or_default();
        surface.clear_markers();
        for marker in &markers {
            surface.add_marker(marker);
        }
        debug!(
            revision,
            markers = markers.len(),
            skipped = loaded.map_or(0, |events| events.len() - markers.len()),
            "replaced map markers"
        );

        self.displayed = markers;
        self.synced_revision = Some(revision);
        true
    }
}

#[cfg(test)]
#[path = "tests/markers_tests.rs"]
mod tests;
