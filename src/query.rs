//! User input for a recommendation request

use crate::backend::types::RecommendRequest;

/// Free-text query and/or job posting URL, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub url: String,
}

impl Query {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, "")
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::new("", url)
    }

    /// Whitespace-only input counts as empty
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.url.trim().is_empty()
    }

    /// Request body for this query, or `None` when there is nothing to send
    pub fn to_request(&self) -> Option<RecommendRequest> {
        if self.is_blank() {
            return None;
        }
        let url = self.url.trim();
        Some(RecommendRequest {
            query: self.text.trim().to_string(),
            url: (!url.is_empty()).then(|| url.to_string()),
        })
    }
}
