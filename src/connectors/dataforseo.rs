//! DataForSEO connector — SERP results and keyword volume data.

use crate::connector::Connector;
use crate::types::{
    ActionParams, ActionResult, ActionSpec, AuthField, AuthFieldType, ConnectorDescriptor,
    Credentials,
};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

pub struct DataForSeoConnector;

impl DataForSeoConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DataForSeoConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for DataForSeoConnector {
    fn descriptor(&self) -> ConnectorDescriptor {
        ConnectorDescriptor {
            id: "dataforseo".to_string(),
            name: "DataForSEO".to_string(),
            description: "SERP tracking and keyword research data".to_string(),
            version: "1.0.0".to_string(),
            category: "seo".to_string(),
            brand_color: "#2d6df6".to_string(),
            website: "https://dataforseo.com".to_string(),
        }
    }

    fn actions(&self) -> Vec<ActionSpec> {
        vec![
            ActionSpec {
                id: "serp_results".to_string(),
                name: "SERP Results".to_string(),
                description: "Organic search results for a keyword".to_string(),
                required_params: vec!["keyword".to_string()],
                optional_params: vec!["location".to_string(), "language".to_string()],
            },
            ActionSpec {
                id: "keyword_volume".to_string(),
                name: "Keyword Volume".to_string(),
                description: "Monthly search volume for a list of keywords".to_string(),
                required_params: vec!["keywords".to_string()],
                optional_params: vec!["location".to_string()],
            },
        ]
    }

    fn auth_fields(&self) -> Vec<AuthField> {
        // DataForSEO uses HTTP basic auth: account email + API password.
        vec![
            AuthField {
                key: "login".to_string(),
                label: "API Login".to_string(),
                field_type: AuthFieldType::Text,
                required: true,
                description: "Account email used as the basic-auth username".to_string(),
            },
            AuthField {
                key: "password".to_string(),
                label: "API Password".to_string(),
                field_type: AuthFieldType::Password,
                required: true,
                description: String::new(),
            },
        ]
    }

    async fn validate_auth(&self, credentials: &Credentials) -> Result<bool> {
        let login = credentials.get("login").map(String::as_str).unwrap_or("");
        let password = credentials.get("password").map(String::as_str).unwrap_or("");
        Ok(login.contains('@') && !password.is_empty())
    }

    async fn execute_action(
        &self,
        action_id: &str,
        params: &ActionParams,
        _auth: &Credentials,
    ) -> Result<ActionResult> {
        let location = params
            .get("location")
            .cloned()
            .unwrap_or_else(|| json!("United States"));
        let result = match action_id {
            "serp_results" => ActionResult::ok(json!({
                "keyword": params["keyword"],
                "location": location,
                "language": params.get("language").cloned().unwrap_or_else(|| json!("en")),
                "results": [
                    {"position": 1, "url": "https://example.com/guide", "title": "The Complete Guide"},
                    {"position": 2, "url": "https://example.org/intro", "title": "An Introduction"},
                ],
            })),
            "keyword_volume" => ActionResult::ok(json!({
                "keywords": params["keywords"],
                "location": location,
                "volumes": [
                    {"keyword": "seo tools", "monthly_volume": 22_000, "cpc": 4.12},
                ],
            })),
            other => ActionResult::failure(format!("Unhandled action '{other}'")),
        };
        Ok(result)
    }
}
