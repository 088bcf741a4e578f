//! Core data model for the connector contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Credentials supplied by the caller at validation/execution time.
///
/// Keys match the `key` of the connector's declared [`AuthField`]s.
/// The core never persists these directly — persistence goes through the
/// credential store, which encrypts the serialized map at rest.
pub type Credentials = BTreeMap<String, String>;

/// Action parameters as supplied by the caller.
pub type ActionParams = serde_json::Map<String, Value>;

/// Immutable connector metadata.
///
/// `id` is the registry key: non-empty, lowercase/underscore, stable across
/// releases. The icon URL is deliberately absent — it is derived from `id`
/// (see [`Connector::icon_url`](crate::connector::Connector::icon_url)) so it
/// can never drift out of sync with the identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectorDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub category: String,
    pub brand_color: String,
    pub website: String,
}

/// Declared shape of one callable connector capability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Unique within the connector (e.g., "backlinks_summary").
    pub id: String,
    pub name: String,
    pub description: String,
    /// Parameter keys that must be present in every call.
    pub required_params: Vec<String>,
    /// Parameter keys the caller may supply. Disjoint from `required_params`.
    pub optional_params: Vec<String>,
}

impl ActionSpec {
    /// Returns true when no key appears in both the required and optional sets.
    pub fn params_disjoint(&self) -> bool {
        !self
            .required_params
            .iter()
            .any(|p| self.optional_params.contains(p))
    }
}

/// Input type of a credential field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthFieldType {
    Text,
    Password,
}

/// One credential input declared by a connector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthField {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: AuthFieldType,
    pub required: bool,
    pub description: String,
}

/// Tagged outcome of an action execution.
///
/// Transport failures from outbound calls surface here as `success: false`
/// with an `error` message — they never propagate as faults past the
/// connector boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// An event source a connector can expose to the (future) workflow engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub id: String,
    pub name: String,
    pub description: String,
}
