//! URL Generation
//!
//! Resource URLs have the shape `{endpoint}/v1beta/{tenant_id}/{path}`.
//! Path segments are percent-encoded; list filters become the query string.

use std::collections::BTreeMap;

/// API version prefix for tenant-scoped resources
pub const API_VERSION: &str = "v1beta";

/// Build a tenant-scoped resource URL from raw path segments
pub fn tenant_url(endpoint: &str, tenant_id: &str, segments: &[&str]) -> String {
    let mut url = format!(
        "{}/{}/{}",
        endpoint.trim_end_matches('/'),
        API_VERSION,
        urlencoding::encode(tenant_id)
    );
    push_segments(&mut url, segments);
    url
}

/// Build a URL at the service root, used for version discovery
pub fn root_url(endpoint: &str, segments: &[&str]) -> String {
    let mut url = endpoint.trim_end_matches('/').to_string();
    if segments.is_empty() {
        url.push('/');
    }
    push_segments(&mut url, segments);
    url
}

fn push_segments(url: &mut String, segments: &[&str]) {
    for segment in segments {
        url.push('/');
        url.push_str(&urlencoding::encode(segment));
    }
}

// =============================================================================
// List Filters
// =============================================================================

/// Sort direction for list calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl std::fmt::Display for SortDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDir::Asc => write!(f, "asc"),
            SortDir::Desc => write!(f, "desc"),
        }
    }
}

/// Query parameters for list calls (paging, sorting, field filters)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    params: BTreeMap<String, String>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on a resource field, e.g. `("status", "available")`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn limit(self, limit: u32) -> Self {
        self.with("limit", limit.to_string())
    }

    pub fn offset(self, offset: u32) -> Self {
        self.with("offset", offset.to_string())
    }

    pub fn sort(self, key: impl Into<String>, dir: SortDir) -> Self {
        self.with("sortKey", key).with("sortDir", dir.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encoded query string including the leading `?`, or empty
    pub fn to_query(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| {
                format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
            })
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ListFilter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ListFilter::new(), |filter, (k, v)| filter.with(k, v))
    }
}
