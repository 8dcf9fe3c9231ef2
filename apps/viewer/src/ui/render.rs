use std::fmt::Write as _;

use events_core::{EventsState, FetchOutcome, PageWindowEntry, PaginationControl};
use shared::domain::Event;

use crate::{
    controller::events::{FailureCategory, FetchFailure},
    ui::map::TextMap,
};

pub fn render_view(state: &EventsState, pagination: &PaginationControl, map: &TextMap) -> String {
    let query = state.query();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== organization {} | page {} | {} per page ==",
        query.organization_id, query.page, query.per_page
    );

    match state.outcome() {
        FetchOutcome::Pending => out.push_str("Loading events...\n"),
        FetchOutcome::Failed { message } => {
            let failure = FetchFailure::from_message(message.as_str());
            let _ = writeln!(out, "{}", failure.hint());
            if failure.category() != FailureCategory::Unknown {
                let _ = writeln!(out, "  ({})", failure.message());
            }
        }
        FetchOutcome::Loaded(page) => {
            let _ = writeln!(out, "{} upcoming events", page.count);
            if page.events.is_empty() {
                out.push_str("  (no events on this page)\n");
            }
            for event in &page.events {
                render_event(&mut out, event);
            }
        }
    }

    let _ = writeln!(out, "\n{}", render_pagination(pagination));

    out.push_str("\nmap:\n");
    if map.pins().is_empty() {
        out.push_str("  (no mapped events)\n");
    }
    for pin in map.pins() {
        let _ = writeln!(out, "  * {pin}");
    }
    out
}

fn render_event(out: &mut String, event: &Event) {
    let _ = writeln!(out, "- {}", event.title);
    let place = event.location.as_ref().map(|location| {
        [
            location.venue.as_deref(),
            location.locality.as_deref(),
            location.region.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    });
    match place {
        Some(place) if !place.is_empty() => {
            let _ = writeln!(out, "    {place}");
        }
        _ => out.push_str("    (no location)\n"),
    }
    if let Some(summary) = event.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(out, "    {}", summary.trim());
    }
}

/// `< 1 … 4 5 [6] 7 8 … 193 >`, with `<`/`>` replaced by spaces when disabled.
pub fn render_pagination(pagination: &PaginationControl) -> String {
    let mut parts = Vec::with_capacity(pagination.entries().len() + 2);
    parts.push(if pagination.previous().is_some() { "<" } else { " " }.to_string());
    for entry in pagination.entries() {
        parts.push(match entry {
            PageWindowEntry::Page(page) if *page == pagination.current_page() => {
                format!("[{page}]")
            }
            PageWindowEntry::Page(page) => page.to_string(),
            PageWindowEntry::Gap => "…".to_string(),
        });
    }
    parts.push(if pagination.next().is_some() { ">" } else { " " }.to_string());
    parts.join(" ")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
