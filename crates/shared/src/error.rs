use serde::{Deserialize, Serialize};

/// Error body returned by the events API alongside a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, alias = "detail", alias = "error")]
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// `code: message` when the API sent a code, otherwise just the message.
    pub fn describe(&self) -> String {
        match self.code.as_deref().map(str::trim).filter(|code| !code.is_empty()) {
            Some(code) if !self.message.is_empty() => format!("{code}: {}", self.message),
            Some(code) => code.to_string(),
            None => self.message.clone(),
        }
    }

    /// Parses an error body, falling back to the raw text when it is not JSON.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<ApiError>(body) {
            Ok(parsed) if !parsed.message.trim().is_empty() => parsed,
            _ => Self::new(body.trim()),
        }
    }
}
