//! Cloudflare API response types.

use serde::Deserialize;

use crate::error_handling::ResolveError;

/// The envelope every Cloudflare v4 endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub result_info: Option<ResultInfo>,
    pub result: Option<T>,
    pub success: bool,
    pub errors: Option<Vec<CodedMessage>>,
    pub messages: Option<Vec<CodedMessage>>,
}

impl<T> CloudflareResponse<T> {
    /// Rejects envelopes with `success: false`, using the first reported
    /// error as the message.
    pub fn into_checked(self) -> Result<Self, ResolveError> {
        if self.success {
            return Ok(self);
        }
        let message = self
            .errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|e| format!("{} (code {})", e.message, e.code))
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(ResolveError::Api(message))
    }
}

#[derive(Debug, Deserialize)]
pub struct CodedMessage {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}

/// Pagination metadata of list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResultInfo {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub count: u32,
    pub total_count: u32,
}

impl ResultInfo {
    /// Whether another page follows `requested_page`.
    ///
    /// The page echoed by the API wins when it is ahead of the one requested.
    pub fn has_more_after(&self, requested_page: u32) -> bool {
        self.page.max(requested_page) < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Record types the resolver cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "CNAME")]
    Cname,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// May start with a `*` label.
    pub name: String,
    pub content: String,
}
