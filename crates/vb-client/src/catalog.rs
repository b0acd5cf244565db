//! Endpoint template catalog.
//!
//! Maps a logical endpoint key (`UserTweets`, `TweetDetail`, …) to the
//! GraphQL query identifier, the variables/features/fieldToggles templates,
//! and — for endpoints that want a signed transaction header — the
//! method + path pair to sign. A built-in catalog ships with the crate;
//! a file can override it wholesale.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::models::ModelKind;

const BUILTIN: &str = include_str!("endpoints.json");

/// One endpoint's request template.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointTemplate {
    #[serde(rename = "queryId")]
    pub query_id: String,
    /// Type tag of the model this endpoint decodes into.
    pub model: String,
    pub variables: Option<Map<String, Value>>,
    pub features: Option<Map<String, Value>>,
    #[serde(rename = "fieldToggles")]
    pub field_toggles: Option<Map<String, Value>>,
    /// Method + path to sign, for endpoints that want the transaction
    /// header. Both present or the header is skipped.
    #[serde(rename = "@method")]
    pub method: Option<String>,
    #[serde(rename = "@path")]
    pub path: Option<String>,
}

impl EndpointTemplate {
    /// The variables template merged with call-specific overrides (cursor,
    /// target identifiers). Overrides win on key collision.
    #[must_use]
    pub fn variables_with(&self, overrides: &Map<String, Value>) -> Map<String, Value> {
        let mut merged = self.variables.clone().unwrap_or_default();
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Resolve the endpoint's model variant through the closed registry.
    ///
    /// # Errors
    ///
    /// [`ClientError::UnknownTypeTag`] when the catalog names a model this
    /// build does not know.
    pub fn model_kind(&self) -> Result<ModelKind, ClientError> {
        ModelKind::from_tag(&self.model)
            .ok_or_else(|| ClientError::UnknownTypeTag(self.model.clone()))
    }

    /// The method + path pair to sign, when the template carries one.
    #[must_use]
    pub fn signing_target(&self) -> Option<(&str, &str)> {
        match (self.method.as_deref(), self.path.as_deref()) {
            (Some(method), Some(path)) => Some((method, path)),
            _ => None,
        }
    }
}

/// The catalog: endpoint key → template.
#[derive(Debug, Clone)]
pub struct EndpointCatalog {
    endpoints: BTreeMap<String, EndpointTemplate>,
}

impl EndpointCatalog {
    /// The catalog embedded in the crate.
    ///
    /// # Panics
    ///
    /// Panics if the embedded document is malformed, which the test suite
    /// rules out.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            endpoints: serde_json::from_str(BUILTIN)
                .expect("embedded endpoint catalog should parse"),
        }
    }

    /// Load a catalog from a JSON file of the same shape.
    ///
    /// # Errors
    ///
    /// [`ClientError::Catalog`] if the file is unreadable or malformed.
    pub fn from_file(path: &Path) -> Result<Self, ClientError> {
        let body = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Catalog(format!("reading {}: {e}", path.display())))?;
        let endpoints = serde_json::from_str(&body)
            .map_err(|e| ClientError::Catalog(format!("parsing {}: {e}", path.display())))?;
        Ok(Self { endpoints })
    }

    /// Look up one endpoint's template.
    ///
    /// # Errors
    ///
    /// [`ClientError::UnknownEndpoint`] for keys outside the catalog.
    pub fn get(&self, key: &str) -> Result<&EndpointTemplate, ClientError> {
        self.endpoints
            .get(key)
            .ok_or_else(|| ClientError::UnknownEndpoint(key.to_owned()))
    }

    /// Endpoint keys in deterministic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn builtin_catalog_parses_and_resolves_models() {
        let catalog = EndpointCatalog::builtin();
        for key in ["UserByScreenName", "UserTweets", "TweetDetail", "HomeTimeline"] {
            let template = catalog.get(key).expect("builtin endpoint");
            template.model_kind().expect("registered model");
            assert!(!template.query_id.is_empty());
        }
    }

    #[test]
    fn unknown_key_is_a_distinct_error() {
        let err = EndpointCatalog::builtin().get("SearchTimeline").unwrap_err();
        assert!(matches!(err, ClientError::UnknownEndpoint(key) if key == "SearchTimeline"));
    }

    #[test]
    fn overrides_win_over_the_template() {
        let catalog = EndpointCatalog::builtin();
        let template = catalog.get("UserTweets").unwrap();

        let mut overrides = Map::new();
        overrides.insert("userId".to_owned(), json!("12"));
        overrides.insert("count".to_owned(), json!(5));

        let merged = template.variables_with(&overrides);
        assert_eq!(merged["userId"], json!("12"));
        assert_eq!(merged["count"], json!(5));
        assert_eq!(merged["withVoice"], json!(true));
    }

    #[test]
    fn no_overrides_returns_the_template_as_is() {
        let catalog = EndpointCatalog::builtin();
        let template = catalog.get("TweetDetail").unwrap();
        let merged = template.variables_with(&Map::new());
        assert_eq!(merged["with_rux_injections"], json!(false));
    }

    #[test]
    fn signing_target_requires_both_members() {
        let catalog = EndpointCatalog::builtin();
        assert!(catalog.get("UserTweets").unwrap().signing_target().is_some());
        assert!(catalog.get("HomeTimeline").unwrap().signing_target().is_none());
    }
}
