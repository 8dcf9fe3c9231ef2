//! Classification of fetch failures into short hints for the user.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Unreachable,
    NotFound,
    RateLimited,
    Server,
    Payload,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct FetchFailure {
    category: FailureCategory,
    message: String,
}

impl FetchFailure {
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = match status_code(&lower) {
            Some(404) => FailureCategory::NotFound,
            Some(429) => FailureCategory::RateLimited,
            Some(500..=599) => FailureCategory::Server,
            Some(_) => FailureCategory::Unknown,
            None => classify_without_status(&lower),
        };

        Self { category, message }
    }

    pub fn category(&self) -> FailureCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hint(&self) -> String {
        match self.category {
            FailureCategory::Unreachable => {
                "Events API unreachable; check the URL/network and change page to retry.".into()
            }
            FailureCategory::NotFound => {
                "Organization not found; check the organization id.".into()
            }
            FailureCategory::RateLimited => {
                "Events API is rate limiting requests; wait a moment and retry.".into()
            }
            FailureCategory::Server => "Events API had an internal error; retry later.".into(),
            FailureCategory::Payload => {
                "Events API sent a response the viewer could not read.".into()
            }
            FailureCategory::Unknown => format!("Could not load events: {}", self.message),
        }
    }
}

/// The HTTP status in `... returned NNN: ...` messages.
fn status_code(lower: &str) -> Option<u16> {
    let (_, rest) = lower.split_once("returned ")?;
    let digits = rest.get(..3)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn classify_without_status(lower: &str) -> FailureCategory {
    if lower.contains("not found") {
        FailureCategory::NotFound
    } else if lower.contains("too many requests") {
        FailureCategory::RateLimited
    } else if lower.contains("malformed") || lower.contains("invalid type") {
        FailureCategory::Payload
    } else if lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("timed out")
        || lower.contains("request failed")
    {
        FailureCategory::Unreachable
    } else {
        FailureCategory::Unknown
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
