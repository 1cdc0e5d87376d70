//! Wire types for the recommendation service

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /api/recommend`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendRequest {
    pub query: String,
    pub url: Option<String>,
}

impl RecommendRequest {
    /// JSON body; `url` is omitted when absent
    pub fn to_json(&self) -> Value {
        let mut body = json!({ "query": self.query });
        if let Some(url) = &self.url {
            body["url"] = Value::String(url.clone());
        }
        body
    }
}

/// One recommended assessment, in the order the service ranked it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawItem")]
pub struct RecommendationItem {
    pub name: String,
    pub description: String,
    pub url: String,
    pub remote_testing: bool,
    pub adaptive_irt: bool,
    pub keywords: Vec<String>,
}

/// Item as sent by the service. Snake and camel case spellings are separate
/// fields so a body carrying both is not a duplicate-field error.
#[derive(Debug, Deserialize)]
struct RawItem {
    name: Option<String>,
    title: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
    remote_testing: Option<bool>,
    #[serde(rename = "remoteTesting")]
    remote_testing_camel: Option<bool>,
    adaptive_irt: Option<bool>,
    #[serde(rename = "adaptiveIRT")]
    adaptive_irt_camel: Option<bool>,
    #[serde(rename = "adaptiveIrt")]
    adaptive_irt_lower: Option<bool>,
    #[serde(default)]
    keywords: Vec<String>,
}

impl TryFrom<RawItem> for RecommendationItem {
    type Error = String;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let name = raw
            .name
            .or(raw.title)
            .ok_or_else(|| "recommendation item has neither name nor title".to_string())?;

        Ok(Self {
            name,
            description: raw.description,
            url: raw.url,
            remote_testing: raw.remote_testing.or(raw.remote_testing_camel).unwrap_or(false),
            adaptive_irt: raw
                .adaptive_irt
                .or(raw.adaptive_irt_camel)
                .or(raw.adaptive_irt_lower)
                .unwrap_or(false),
            keywords: raw.keywords,
        })
    }
}

/// Successful submission: the result set plus an optional advisory from the service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recommendations {
    pub items: Vec<RecommendationItem>,
    pub message: Option<String>,
}

/// Success body of `POST /api/recommend`. A top-level `status` field, if any,
/// is ignored; `recommendations` alone decides success.
#[derive(Debug, Deserialize)]
pub(crate) struct RecommendResponse {
    pub recommendations: Vec<RecommendationItem>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of the health endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
