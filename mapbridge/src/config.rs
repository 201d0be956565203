//! Static configuration the bridge receives at construction time.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::BridgeError;

lazy_static! {
    static ref URL_PATTERN: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").expect("url pattern is valid");
}

/// Configuration of a map view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// Style URL or an inline style document.
    #[serde(alias = "styleURL", alias = "styleJSON")]
    pub style: String,
    /// Access token for the tile and style services.
    pub access_token: String,
}

impl MapConfig {
    /// Creates a new configuration.
    pub fn new(style: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            access_token: access_token.into(),
        }
    }

    /// Reads the configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(json)
            .map_err(|err| BridgeError::Configuration(format!("malformed map configuration: {err}")))
    }

    /// Checks that the configuration can be used to construct a map, and returns the resolved style source.
    pub(crate) fn validate(&self) -> Result<StyleSource, BridgeError> {
        if self.access_token.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "access token is not set".to_string(),
            ));
        }

        StyleSource::parse(&self.style).ok_or_else(|| {
            BridgeError::Configuration(format!(
                "style is neither a URL nor a JSON document: {:?}",
                self.style
            ))
        })
    }
}

/// Where the style document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSource {
    /// Style is loaded from the given URL.
    Url(String),
    /// Style is given inline as a JSON document.
    Json(String),
}

impl StyleSource {
    /// Disambiguates a style value. The value is treated as a URL first, then as a JSON object. Returns `None` if it
    /// is neither.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if URL_PATTERN.is_match(value) {
            return Some(Self::Url(value.to_string()));
        }

        match serde_json::from_str::<serde_json::Value>(value) {
            Ok(serde_json::Value::Object(_)) => Some(Self::Json(value.to_string())),
            _ => None,
        }
    }
}
