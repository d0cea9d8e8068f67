//! URL composition for Pixela endpoints.
//!
//! Every URL is `{base}/{version}/users[/{username}[/...]]`. All functions
//! here are pure: identical inputs always produce an identical string.

/// Default Pixela host.
pub const DEFAULT_BASE_URL: &str = "https://pixe.la";

/// API version path segment.
pub const API_VERSION: &str = "v1";

/// Path segment selected after `graphs/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphDetail<'a> {
    Pixels,
    Increment,
    Decrement,
    Stats,
    /// A literal yyyyMMdd date
    Date(&'a str),
}

impl GraphDetail<'_> {
    fn segment(&self) -> &str {
        match self {
            Self::Pixels => "pixels",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Stats => "stats",
            Self::Date(date) => date,
        }
    }
}

/// Builds endpoint URLs for one base host and username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Trailing slashes on `base_url` are ignored.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/v1/users`
    #[must_use]
    pub fn users(&self) -> String {
        format!("{}/{API_VERSION}/users", self.base_url)
    }

    /// `{base}/v1/users/{username}`
    #[must_use]
    pub fn user(&self, username: &str) -> String {
        format!("{}/{username}", self.users())
    }

    /// `{base}/v1/users/{username}/graphs`
    #[must_use]
    pub fn graphs(&self, username: &str) -> String {
        format!("{}/graphs", self.user(username))
    }

    /// `{base}/v1/users/{username}/graphs/{graph_id}`
    #[must_use]
    pub fn graph(&self, username: &str, graph_id: &str) -> String {
        format!("{}/{graph_id}", self.graphs(username))
    }

    /// `{base}/v1/users/{username}/graphs/{graph_id}/{detail}`
    #[must_use]
    pub fn graph_detail(&self, username: &str, graph_id: &str, detail: GraphDetail<'_>) -> String {
        format!("{}/{}", self.graph(username, graph_id), detail.segment())
    }

    /// `{base}/v1/users/{username}/webhooks`
    #[must_use]
    pub fn webhooks(&self, username: &str) -> String {
        format!("{}/webhooks", self.user(username))
    }

    /// `{base}/v1/users/{username}/webhooks/{hash}`
    #[must_use]
    pub fn webhook(&self, username: &str, hash: &str) -> String {
        format!("{}/{hash}", self.webhooks(username))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Appends `?k=v&k=v` built from the parameters that are `Some`, in the order
/// given. Values are inserted verbatim without percent-encoding.
#[must_use]
pub fn with_query(url: String, params: &[(&str, Option<&str>)]) -> String {
    let query = params
        .iter()
        .filter_map(|(key, value)| value.map(|value| format!("{key}={value}")))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        url
    } else {
        format!("{url}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_user_and_graph_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.users(), "https://pixe.la/v1/users");
        assert_eq!(endpoints.user("alice"), "https://pixe.la/v1/users/alice");
        assert_eq!(
            endpoints.graph("alice", "reading"),
            "https://pixe.la/v1/users/alice/graphs/reading"
        );
    }

    #[test]
    fn composes_graph_detail_segments() {
        let endpoints = Endpoints::new("http://localhost:8080/");
        assert_eq!(
            endpoints.graph_detail("a", "g", GraphDetail::Pixels),
            "http://localhost:8080/v1/users/a/graphs/g/pixels"
        );
        assert_eq!(
            endpoints.graph_detail("a", "g", GraphDetail::Increment),
            "http://localhost:8080/v1/users/a/graphs/g/increment"
        );
        assert_eq!(
            endpoints.graph_detail("a", "g", GraphDetail::Date("20210101")),
            "http://localhost:8080/v1/users/a/graphs/g/20210101"
        );
    }

    #[test]
    fn composes_webhook_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.webhook("a", "abc123"),
            "https://pixe.la/v1/users/a/webhooks/abc123"
        );
    }

    #[test]
    fn url_composition_is_deterministic() {
        let first = Endpoints::default().graph_detail("a", "g", GraphDetail::Stats);
        let second = Endpoints::default().graph_detail("a", "g", GraphDetail::Stats);
        assert_eq!(first, second);
    }

    #[test]
    fn query_keeps_declaration_order_and_skips_absent() {
        let url = "https://pixe.la/v1/users/a/graphs/g".to_string();
        assert_eq!(
            with_query(url.clone(), &[("date", Some("20210101")), ("mode", Some("short"))]),
            "https://pixe.la/v1/users/a/graphs/g?date=20210101&mode=short"
        );
        assert_eq!(
            with_query(url.clone(), &[("date", None), ("mode", Some("short"))]),
            "https://pixe.la/v1/users/a/graphs/g?mode=short"
        );
        assert_eq!(with_query(url.clone(), &[("date", None), ("mode", None)]), url);
    }

    #[test]
    fn query_values_are_not_escaped() {
        let url = with_query("http://h/x".to_string(), &[("mode", Some("a&b c"))]);
        assert_eq!(url, "http://h/x?mode=a&b c");
    }
}
