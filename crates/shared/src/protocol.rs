use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Event, OrganizationId, PerPage};

/// One page request against an organization's event listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEventsRequest {
    pub organization_id: OrganizationId,
    pub page: u32,
    pub per_page: PerPage,
    /// Only events whose last timeslot ends at or after this instant.
    pub ends_after: DateTime<Utc>,
}

impl ListEventsRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("timeslot_end", format!("gte_{}", self.ends_after.timestamp())),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEventsResponse {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default)]
    pub data: Vec<Event>,
}
