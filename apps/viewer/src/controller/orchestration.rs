//! Maps prompt commands onto session transitions.

use events_core::{EventsSession, EventsSource, MapSurface, TransitionOutcome};

use crate::controller::commands::{ViewerCommand, HELP};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// State changed; redraw the view.
    Render,
    /// Nothing changed; show this line instead.
    Notice(String),
    Quit,
}

pub fn dispatch_command<S: EventsSource, M: MapSurface>(
    session: &mut EventsSession<S, M>,
    command: ViewerCommand,
) -> Flow {
    let command_name = match command {
        ViewerCommand::Next => "next",
        ViewerCommand::Previous => "previous",
        ViewerCommand::GoToPage(_) => "go_to_page",
        ViewerCommand::Organization(_) => "organization",
        ViewerCommand::PerPage(_) => "per_page",
        ViewerCommand::Help => "help",
        ViewerCommand::Quit => "quit",
    };
    tracing::debug!(command = command_name, "dispatching viewer command");

    match command {
        ViewerCommand::Next => outcome_flow(session.next_page(), "no next page"),
        ViewerCommand::Previous => outcome_flow(session.previous_page(), "no previous page"),
        ViewerCommand::GoToPage(page) => {
            let page_count = session.state().page_count();
            if session.state().events().is_some() && page > page_count.max(1) {
                return Flow::Notice(format!(
                    "page {page} is past the last page ({})",
                    page_count.max(1)
                ));
            }
            outcome_flow(
                session.go_to_page(page),
                &format!("already on page {page}"),
            )
        }
        ViewerCommand::Organization(organization_id) => outcome_flow(
            session.set_organization(organization_id),
            &format!("already showing organization {organization_id}"),
        ),
        ViewerCommand::PerPage(per_page) => outcome_flow(
            session.set_per_page(per_page),
            &format!("already showing {per_page} per page"),
        ),
        ViewerCommand::Help => Flow::Notice(HELP.to_string()),
        ViewerCommand::Quit => Flow::Quit,
    }
}

fn outcome_flow(outcome: TransitionOutcome, unchanged: &str) -> Flow {
    match outcome {
        TransitionOutcome::Applied => Flow::Render,
        TransitionOutcome::Unchanged | TransitionOutcome::Rejected | TransitionOutcome::Stale => {
            Flow::Notice(unchanged.to_string())
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
