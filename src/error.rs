//! Error taxonomy for registry dispatch.
//!
//! Contract violations (unknown connector, undeclared action, missing
//! required params) are typed so the API layer can map them to 4xx responses.
//! Auth rejection is not an error — `validate_auth` returns `false`.

/// Errors surfaced by the registry and its dispatch operations.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("Connector '{0}' not found")]
    ConnectorNotFound(String),

    #[error("Connector '{0}' is already registered")]
    DuplicateConnector(String),

    #[error("Connector '{connector}' has no action '{action}'")]
    UnknownAction { connector: String, action: String },

    #[error("Missing required parameters: {}", .missing.join(", "))]
    MissingParameters { missing: Vec<String> },

    /// Transport-level failure from an outbound call (network error,
    /// upstream 5xx). Distinct from auth rejection, which is a boolean.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameters_names_keys() {
        let err = HubError::MissingParameters {
            missing: vec!["target".to_string(), "mode".to_string()],
        };
        assert_eq!(err.to_string(), "Missing required parameters: target, mode");
    }

    #[test]
    fn test_unknown_action_message() {
        let err = HubError::UnknownAction {
            connector: "ahrefs".to_string(),
            action: "fly".to_string(),
        };
        assert_eq!(err.to_string(), "Connector 'ahrefs' has no action 'fly'");
    }
}
