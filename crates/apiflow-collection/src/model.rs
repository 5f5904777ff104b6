//! Imported collection documents
//!
//! Only the fields the transform reads are modelled; everything else in the
//! export is ignored. Items are read-only once parsed.

use crate::error::{Result, TransformError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Method assumed when a request does not name one
pub const DEFAULT_METHOD: &str = "GET";

/// Name used when the collection has none
pub const DEFAULT_COLLECTION_NAME: &str = "API Collection";

/// Recognition rule for collection documents: `info` is present and not
/// null, and `item` is an array.
pub fn is_collection_document(document: &Value) -> bool {
    let has_info = document.get("info").is_some_and(|info| !info.is_null());
    let has_items = document.get("item").is_some_and(Value::is_array);
    has_info && has_items
}

/// Reads an optional field, treating a value of the wrong shape as absent
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Free text that may be exported either as a string or as `{ "content": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceText {
    Plain(String),
    Rich {
        #[serde(default)]
        content: Option<String>,
    },
}

impl SourceText {
    /// Text content, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SourceText::Plain(text) => Some(text.as_str()),
            SourceText::Rich { content } => content.as_deref(),
        }
    }
}

/// Collection metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<SourceText>,
}

/// Request URL, either a plain string or a structured object with `raw`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceUrl {
    Plain(String),
    Structured {
        #[serde(default)]
        raw: Option<String>,
    },
}

/// Request details of an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<SourceUrl>,
}

/// An item's request: a full object, or a bare URL string (implicitly GET)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceRequest {
    Url(String),
    Detailed(RequestDetails),
}

/// One candidate endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceItem {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub request: Option<SourceRequest>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<SourceText>,
}

impl SourceItem {
    /// Method as written in the source, `GET` when absent
    pub fn method(&self) -> &str {
        match &self.request {
            Some(SourceRequest::Detailed(details)) => details
                .method
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_METHOD),
            Some(SourceRequest::Url(_)) | None => DEFAULT_METHOD,
        }
    }

    /// `request.url.raw`, else `request.url` when it is a string, else empty
    pub fn url(&self) -> &str {
        match &self.request {
            Some(SourceRequest::Url(url)) => url,
            Some(SourceRequest::Detailed(details)) => match &details.url {
                Some(SourceUrl::Plain(url)) => url,
                Some(SourceUrl::Structured { raw }) => raw.as_deref().unwrap_or(""),
                None => "",
            },
            None => "",
        }
    }

    /// Whether the item becomes an endpoint: it has a request and its
    /// method is GET, compared case-insensitively
    pub fn is_retained(&self) -> bool {
        self.request.is_some() && self.method().eq_ignore_ascii_case(DEFAULT_METHOD)
    }

    /// Source name, if present and non-empty
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Source description, if present and non-empty
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_ref()
            .and_then(SourceText::as_str)
            .filter(|d| !d.is_empty())
    }

    /// Source name, or the positional placeholder `Endpoint {position}`
    pub fn name_or_placeholder(&self, position: usize) -> String {
        self.name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Endpoint {}", position))
    }
}

/// An imported collection document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceCollection {
    #[serde(default, deserialize_with = "lenient")]
    pub info: Option<CollectionInfo>,
    pub item: Vec<SourceItem>,
}

impl SourceCollection {
    /// Read a decoded JSON document as a collection
    ///
    /// Fails with `InvalidCollection` when `item` is not an array of objects.
    /// Any other modelled field of an unexpected type reads as absent.
    pub fn from_value(document: Value) -> Result<Self> {
        serde_json::from_value(document)
            .map_err(|e| TransformError::InvalidCollection(e.to_string()))
    }

    /// Collection name, if present and non-empty
    pub fn name(&self) -> Option<&str> {
        self.info
            .as_ref()
            .and_then(|info| info.name.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// Collection description, if present and non-empty
    pub fn description(&self) -> Option<&str> {
        self.info
            .as_ref()
            .and_then(|info| info.description.as_ref())
            .and_then(SourceText::as_str)
            .filter(|d| !d.is_empty())
    }

    /// Total number of items
    pub fn item_count(&self) -> usize {
        self.item.len()
    }

    /// Number of items that become endpoints
    pub fn retained_count(&self) -> usize {
        self.item.iter().filter(|item| item.is_retained()).count()
    }
}
