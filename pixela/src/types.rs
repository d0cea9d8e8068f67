use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// RESPONSE TYPES - Shapes returned by the Pixela API
// =============================================================================

/// Generic result returned by create/update/delete style operations.
///
/// Non-2xx answers carry the same shape with `is_success == false` and the
/// server's explanation in `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// Human readable result, e.g. "Success."
    #[serde(default)]
    pub message: String,
    /// Whether the operation was accepted by the service
    #[serde(default)]
    pub is_success: bool,
}

/// Graph definition as returned by `GET /v1/users/{u}/graphs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDefinition {
    /// Caller-assigned graph identifier
    pub id: String,
    /// Display name of the graph
    pub name: String,
    /// Unit of the recorded quantity, e.g. "commit"
    pub unit: String,
    /// Quantity type ("int" or "float")
    #[serde(rename = "type")]
    pub graph_type: String,
    /// Display color (shibafu/momiji/sora/ichou/ajisai/kuro)
    pub color: String,
    /// IANA timezone; the service assumes UTC when absent
    #[serde(default)]
    pub timezone: Option<String>,
    /// URLs whose cached graph images are purged on update
    #[serde(default, rename = "purgeCacheURLs")]
    pub purge_cache_urls: Option<Vec<String>>,
    /// Increment/decrement behaviour of the graph's webhook-less updates
    #[serde(default)]
    pub self_sufficient: Option<String>,
    /// Whether the graph is hidden from the public graph list
    #[serde(default)]
    pub is_secret: Option<bool>,
    /// Whether pixel `optionalData` is publicly readable
    #[serde(default)]
    pub publish_optional_data: Option<bool>,

    /// Catch-all for any additional fields from the API
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// All graph definitions of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphList {
    #[serde(default)]
    pub graphs: Vec<GraphDefinition>,
    /// Present when the service rejected the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_success: Option<bool>,
}

/// Dates (yyyyMMdd) that hold a pixel within the requested range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelList {
    #[serde(default)]
    pub pixels: Vec<String>,
    /// Present when the service rejected the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_success: Option<bool>,
}

/// A single pixel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pixel {
    /// Quantity as a decimal string, e.g. "5" or "1.25"
    #[serde(default)]
    pub quantity: String,
    /// String-encoded JSON attached to the pixel
    #[serde(default)]
    pub optional_data: Option<String>,
    /// Present when the service rejected the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_success: Option<bool>,
}

impl Pixel {
    /// Decodes `optional_data` back into a JSON value.
    ///
    /// # Errors
    /// Returns an error if the stored string is not valid JSON.
    pub fn optional_data_json(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        self.optional_data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }
}

/// Summary statistics of a graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    #[serde(default)]
    pub total_pixels_count: Option<u64>,
    #[serde(default)]
    pub max_quantity: Option<f64>,
    #[serde(default)]
    pub max_date: Option<String>,
    #[serde(default)]
    pub min_quantity: Option<f64>,
    #[serde(default)]
    pub min_date: Option<String>,
    #[serde(default)]
    pub total_quantity: Option<f64>,
    #[serde(default)]
    pub avg_quantity: Option<f64>,
    #[serde(default)]
    pub todays_quantity: Option<f64>,
    /// Present when the service rejected the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_success: Option<bool>,
}

/// A registered webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    /// Server-assigned identifier used for invoke/delete
    #[serde(rename = "webhookHash")]
    pub webhook_hash: String,
    #[serde(rename = "graphID")]
    pub graph_id: String,
    /// increment/decrement/stopwatch
    #[serde(rename = "type")]
    pub webhook_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookList {
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
    /// Present when the service rejected the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_success: Option<bool>,
}

/// Result of creating a webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreated {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_success: bool,
    /// Only present on success
    #[serde(default)]
    pub webhook_hash: Option<String>,
}

// =============================================================================
// REQUEST TYPES - Users
// =============================================================================

/// Parameters for registering a new user.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub token: String,
    pub username: String,
    /// "yes" or "no"
    pub agree_terms_of_service: String,
    /// "yes" or "no"
    pub not_minor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thanks_code: Option<String>,
}

impl CreateUser {
    /// Creates a registration that accepts the terms and declares the user an adult.
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            agree_terms_of_service: "yes".to_string(),
            not_minor: "yes".to_string(),
            thanks_code: None,
        }
    }

    /// Sets the supporter thanks code
    pub fn with_thanks_code(mut self, thanks_code: &str) -> Self {
        self.thanks_code = Some(thanks_code.to_string());
        self
    }
}

/// Parameters for rotating a user's token on the server.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub new_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thanks_code: Option<String>,
}

impl UpdateUser {
    pub fn new(new_token: impl Into<String>) -> Self {
        Self {
            new_token: new_token.into(),
            thanks_code: None,
        }
    }

    /// Sets the supporter thanks code
    pub fn with_thanks_code(mut self, thanks_code: &str) -> Self {
        self.thanks_code = Some(thanks_code.to_string());
        self
    }
}

// =============================================================================
// REQUEST TYPES - Graphs
// =============================================================================

/// Quantity type of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphType {
    Int,
    Float,
}

impl GraphType {
    /// Canonical string values accepted by the API.
    pub const VALUES: [&'static str; 2] = ["int", "float"];

    /// Returns the canonical API string for this graph type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
        }
    }
}

/// Display color of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphColor {
    Shibafu,
    Momiji,
    Sora,
    Ichou,
    Ajisai,
    Kuro,
}

impl GraphColor {
    /// Canonical string values accepted by the API.
    pub const VALUES: [&'static str; 6] = ["shibafu", "momiji", "sora", "ichou", "ajisai", "kuro"];

    /// Returns the canonical API string for this color.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shibafu => "shibafu",
            Self::Momiji => "momiji",
            Self::Sora => "sora",
            Self::Ichou => "ichou",
            Self::Ajisai => "ajisai",
            Self::Kuro => "kuro",
        }
    }
}

impl std::fmt::Display for GraphType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for GraphColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the canonical values.
#[derive(Debug, Clone)]
pub struct ParseValueError {
    kind: &'static str,
    value: String,
    expected: &'static [&'static str],
}

impl std::fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} '{}'; expected one of: {}",
            self.kind,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for ParseValueError {}

impl std::str::FromStr for GraphType {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            _ => Err(ParseValueError {
                kind: "graph type",
                value: value.to_string(),
                expected: &Self::VALUES,
            }),
        }
    }
}

impl std::str::FromStr for GraphColor {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let color = match value.trim().to_ascii_lowercase().as_str() {
            "shibafu" => Self::Shibafu,
            "momiji" => Self::Momiji,
            "sora" => Self::Sora,
            "ichou" => Self::Ichou,
            "ajisai" => Self::Ajisai,
            "kuro" => Self::Kuro,
            _ => {
                return Err(ParseValueError {
                    kind: "graph color",
                    value: value.to_string(),
                    expected: &Self::VALUES,
                })
            }
        };
        Ok(color)
    }
}

impl From<GraphType> for String {
    fn from(value: GraphType) -> Self {
        value.as_str().to_string()
    }
}

impl From<GraphColor> for String {
    fn from(value: GraphColor) -> Self {
        value.as_str().to_string()
    }
}

/// Parameters for creating a graph
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGraph {
    /// Graph identifier, unique per user (enforced by the service)
    pub id: String,
    pub name: String,
    pub unit: String,
    /// "int" or "float"
    #[serde(rename = "type")]
    pub graph_type: String,
    /// shibafu/momiji/sora/ichou/ajisai/kuro
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// "increment", "decrement" or "none"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_sufficient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_secret: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_optional_data: Option<bool>,
}

impl CreateGraph {
    /// Creates a graph definition with the required fields
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        graph_type: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
            graph_type: graph_type.into(),
            color: color.into(),
            timezone: None,
            self_sufficient: None,
            is_secret: None,
            publish_optional_data: None,
        }
    }

    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = Some(timezone.to_string());
        self
    }

    pub fn with_self_sufficient(mut self, self_sufficient: &str) -> Self {
        self.self_sufficient = Some(self_sufficient.to_string());
        self
    }
}

/// Sparse update of a graph definition.
///
/// Only the fields below are ever forwarded; deserializing an arbitrary JSON
/// object into this type drops unrecognized keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(
        default,
        rename = "purgeCacheURLs",
        skip_serializing_if = "Option::is_none"
    )]
    pub purge_cache_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_sufficient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_secret: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_optional_data: Option<bool>,
}

impl UpdateGraph {
    /// Creates an empty update
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an update from a loosely-typed JSON object, keeping only the
    /// recognized fields.
    ///
    /// # Errors
    /// Returns an error if a recognized field has the wrong JSON type.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Query parameters of the SVG graph endpoint.
#[derive(Debug, Clone, Default)]
pub struct SvgQuery {
    /// yyyyMMdd; the graph is rendered as of this date
    pub date: Option<String>,
    /// Rendering mode, e.g. "short"
    pub mode: Option<String>,
}

impl SvgQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }
}

/// Date range of the pixel history endpoint.
#[derive(Debug, Clone, Default)]
pub struct PixelsQuery {
    /// yyyyMMdd, inclusive
    pub from: Option<String>,
    /// yyyyMMdd, inclusive
    pub to: Option<String>,
}

impl PixelsQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_from(mut self, from: &str) -> Self {
        self.from = Some(from.to_string());
        self
    }

    #[must_use]
    pub fn with_to(mut self, to: &str) -> Self {
        self.to = Some(to.to_string());
        self
    }
}

// =============================================================================
// REQUEST TYPES - Pixels
// =============================================================================

/// Parameters for recording a pixel.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePixel {
    /// yyyyMMdd
    pub date: String,
    /// Decimal string
    pub quantity: String,
    /// String-encoded JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_data: Option<String>,
}

impl CreatePixel {
    pub fn new(date: impl Into<String>, quantity: impl ToString) -> Self {
        Self {
            date: date.into(),
            quantity: quantity.to_string(),
            optional_data: None,
        }
    }

    /// Attaches a JSON value, encoded to its string form.
    ///
    /// # Errors
    /// Returns an error if the value cannot be serialized.
    pub fn with_optional_data(
        mut self,
        data: &serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        self.optional_data = Some(serde_json::to_string(data)?);
        Ok(self)
    }
}

/// Sparse update of an existing pixel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePixel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_data: Option<String>,
}

impl UpdatePixel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: impl ToString) -> Self {
        self.quantity = Some(quantity.to_string());
        self
    }

    /// Attaches a JSON value, encoded to its string form.
    ///
    /// # Errors
    /// Returns an error if the value cannot be serialized.
    pub fn with_optional_data(
        mut self,
        data: &serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        self.optional_data = Some(serde_json::to_string(data)?);
        Ok(self)
    }
}

// =============================================================================
// REQUEST TYPES - Webhooks
// =============================================================================

/// Parameters for registering a webhook on a graph.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWebhook {
    #[serde(rename = "graphID")]
    pub graph_id: String,
    /// increment/decrement/stopwatch
    #[serde(rename = "type")]
    pub webhook_type: String,
}

impl CreateWebhook {
    pub fn new(graph_id: impl Into<String>, webhook_type: impl Into<String>) -> Self {
        Self {
            graph_id: graph_id.into(),
            webhook_type: webhook_type.into(),
        }
    }
}
