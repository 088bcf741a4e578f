//! Connector contract for external API integrations.

use crate::types::{
    ActionParams, ActionResult, ActionSpec, AuthField, ConnectorDescriptor, Credentials,
    TriggerSpec,
};
use anyhow::Result;
use async_trait::async_trait;

/// Base path for connector assets served by the UI layer.
pub const ASSET_BASE: &str = "/assets";

/// Uniform integration contract implemented by every connector.
///
/// Connectors are stateless: instantiated once at registry initialization,
/// they live for the process lifetime and hold no per-request mutable state.
/// Credentials arrive as an argument on every call.
///
/// # Lifecycle
/// 1. Registry registers the connector under `descriptor().id`
/// 2. Caller validates credentials via `validate_auth`
/// 3. Caller invokes declared actions via `execute_action` — the registry
///    has already confirmed the action exists and required params are present
///
/// # Example
/// ```no_run
/// use connector_hub::connector::Connector;
/// use connector_hub::types::*;
/// use async_trait::async_trait;
/// use anyhow::Result;
/// use serde_json::json;
///
/// struct PingConnector;
///
/// #[async_trait]
/// impl Connector for PingConnector {
///     fn descriptor(&self) -> ConnectorDescriptor {
///         ConnectorDescriptor {
///             id: "ping".to_string(),
///             name: "Ping".to_string(),
///             description: "Example connector".to_string(),
///             version: "1.0.0".to_string(),
///             category: "demo".to_string(),
///             brand_color: "#000000".to_string(),
///             website: "https://example.com".to_string(),
///         }
///     }
///
///     fn actions(&self) -> Vec<ActionSpec> {
///         vec![]
///     }
///
///     fn auth_fields(&self) -> Vec<AuthField> {
///         vec![]
///     }
///
///     async fn validate_auth(&self, _credentials: &Credentials) -> Result<bool> {
///         Ok(true)
///     }
///
///     async fn execute_action(
///         &self,
///         _action_id: &str,
///         _params: &ActionParams,
///         _auth: &Credentials,
///     ) -> Result<ActionResult> {
///         Ok(ActionResult::ok(json!({"pong": true})))
///     }
/// }
/// ```
#[async_trait]
pub trait Connector: Send + Sync {
    /// Immutable metadata for this connector.
    fn descriptor(&self) -> ConnectorDescriptor;

    /// Declared actions, in presentation order.
    fn actions(&self) -> Vec<ActionSpec>;

    /// Declared credential inputs, in presentation order.
    fn auth_fields(&self) -> Vec<AuthField>;

    /// Checks credentials against the external service.
    ///
    /// Returns `Ok(false)` for merely-wrong credentials. `Err` is reserved
    /// for transport-level failures (network errors, upstream 5xx) that are
    /// distinct from auth rejection.
    async fn validate_auth(&self, credentials: &Credentials) -> Result<bool>;

    /// Executes a declared action.
    ///
    /// The registry validates the contract before delegating, so
    /// implementations may assume `action_id` is declared and all required
    /// params are present. Outbound call failures must be reported as
    /// `ActionResult::failure`, not `Err`.
    async fn execute_action(
        &self,
        action_id: &str,
        params: &ActionParams,
        auth: &Credentials,
    ) -> Result<ActionResult>;

    /// Looks up one declared action by id.
    fn action(&self, action_id: &str) -> Option<ActionSpec> {
        self.actions().into_iter().find(|a| a.id == action_id)
    }

    /// Icon URL, derived from the connector id.
    ///
    /// Always `{ASSET_BASE}/connectors/{id}.svg` — derived rather than stored
    /// so there is no separate invariant to keep in sync with the id.
    fn icon_url(&self) -> String {
        format!("{}/connectors/{}.svg", ASSET_BASE, self.descriptor().id)
    }

    /// Event sources exposed to the workflow engine. Empty by default.
    fn triggers(&self) -> Vec<TriggerSpec> {
        Vec::new()
    }

    /// Subscribes to a trigger. Returns `false` (unsupported) unless the
    /// connector overrides it.
    fn register_trigger(&self, _trigger_id: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct BareConnector;

    #[async_trait]
    impl Connector for BareConnector {
        fn descriptor(&self) -> ConnectorDescriptor {
            ConnectorDescriptor {
                id: "bare".to_string(),
                name: "Bare".to_string(),
                description: String::new(),
                version: "0.1.0".to_string(),
                category: "test".to_string(),
                brand_color: "#cccccc".to_string(),
                website: String::new(),
            }
        }

        fn actions(&self) -> Vec<ActionSpec> {
            vec![ActionSpec {
                id: "noop".to_string(),
                name: "No-op".to_string(),
                description: String::new(),
                required_params: vec![],
                optional_params: vec![],
            }]
        }

        fn auth_fields(&self) -> Vec<AuthField> {
            vec![]
        }

        async fn validate_auth(&self, _credentials: &Credentials) -> Result<bool> {
            Ok(true)
        }

        async fn execute_action(
            &self,
            _action_id: &str,
            _params: &ActionParams,
            _auth: &Credentials,
        ) -> Result<ActionResult> {
            Ok(ActionResult::ok(json!(null)))
        }
    }

    #[test]
    fn test_icon_url_derived_from_id() {
        let connector = BareConnector;
        assert_eq!(connector.icon_url(), "/assets/connectors/bare.svg");
    }

    #[test]
    fn test_default_triggers_empty() {
        let connector = BareConnector;
        assert!(connector.triggers().is_empty());
        assert!(!connector.register_trigger("anything"));
    }

    #[test]
    fn test_action_lookup() {
        let connector = BareConnector;
        assert!(connector.action("noop").is_some());
        assert!(connector.action("missing").is_none());
    }
}
