//! Ahrefs connector — backlink and domain authority data.

use crate::connector::Connector;
use crate::types::{
    ActionParams, ActionResult, ActionSpec, AuthField, AuthFieldType, ConnectorDescriptor,
    Credentials,
};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

pub struct AhrefsConnector;

impl AhrefsConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AhrefsConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for AhrefsConnector {
    fn descriptor(&self) -> ConnectorDescriptor {
        ConnectorDescriptor {
            id: "ahrefs".to_string(),
            name: "Ahrefs".to_string(),
            description: "Backlink profiles, domain ratings, and keyword difficulty data"
                .to_string(),
            version: "1.0.0".to_string(),
            category: "seo".to_string(),
            brand_color: "#ff8800".to_string(),
            website: "https://ahrefs.com".to_string(),
        }
    }

    fn actions(&self) -> Vec<ActionSpec> {
        vec![
            ActionSpec {
                id: "domain_rating".to_string(),
                name: "Domain Rating".to_string(),
                description: "Fetch the domain rating for a target domain".to_string(),
                required_params: vec!["target".to_string()],
                optional_params: vec![],
            },
            ActionSpec {
                id: "backlinks_summary".to_string(),
                name: "Backlinks Summary".to_string(),
                description: "Summary of the backlink profile for a target".to_string(),
                required_params: vec!["target".to_string()],
                optional_params: vec!["mode".to_string()],
            },
            ActionSpec {
                id: "keyword_difficulty".to_string(),
                name: "Keyword Difficulty".to_string(),
                description: "Difficulty score for a keyword".to_string(),
                required_params: vec!["keyword".to_string()],
                optional_params: vec!["country".to_string()],
            },
        ]
    }

    fn auth_fields(&self) -> Vec<AuthField> {
        vec![AuthField {
            key: "api_key".to_string(),
            label: "API Key".to_string(),
            field_type: AuthFieldType::Password,
            required: true,
            description: "Ahrefs API key from the account settings page".to_string(),
        }]
    }

    async fn validate_auth(&self, credentials: &Credentials) -> Result<bool> {
        // Shape check only; the real API is not called from here.
        let key = credentials.get("api_key").map(String::as_str).unwrap_or("");
        Ok(key.len() >= 16 && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
    }

    async fn execute_action(
        &self,
        action_id: &str,
        params: &ActionParams,
        _auth: &Credentials,
    ) -> Result<ActionResult> {
        let result = match action_id {
            "domain_rating" => ActionResult::ok(json!({
                "target": params["target"],
                "domain_rating": 71,
                "ahrefs_rank": 15_234,
            })),
            "backlinks_summary" => ActionResult::ok(json!({
                "target": params["target"],
                "mode": params.get("mode").cloned().unwrap_or_else(|| json!("domain")),
                "backlinks": 18_402,
                "referring_domains": 642,
                "dofollow_percent": 83,
            })),
            "keyword_difficulty" => ActionResult::ok(json!({
                "keyword": params["keyword"],
                "difficulty": 38,
                "search_volume": 5_400,
            })),
            other => ActionResult::failure(format!("Unhandled action '{other}'")),
        };
        Ok(result)
    }
}
