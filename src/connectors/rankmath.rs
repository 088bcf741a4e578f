//! RankMath connector — on-site SEO scores and sitemap status.
//!
//! The only built-in that exposes a trigger: workflows can subscribe to SEO
//! score changes once the execution engine lands.

use crate::connector::Connector;
use crate::types::{
    ActionParams, ActionResult, ActionSpec, AuthField, AuthFieldType, ConnectorDescriptor,
    Credentials, TriggerSpec,
};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

pub struct RankMathConnector;

impl RankMathConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RankMathConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for RankMathConnector {
    fn descriptor(&self) -> ConnectorDescriptor {
        ConnectorDescriptor {
            id: "rankmath".to_string(),
            name: "RankMath".to_string(),
            description: "On-site SEO analysis and sitemap monitoring".to_string(),
            version: "1.0.0".to_string(),
            category: "seo".to_string(),
            brand_color: "#8a4fff".to_string(),
            website: "https://rankmath.com".to_string(),
        }
    }

    fn actions(&self) -> Vec<ActionSpec> {
        vec![
            ActionSpec {
                id: "seo_score".to_string(),
                name: "SEO Score".to_string(),
                description: "Analysis score for one URL".to_string(),
                required_params: vec!["url".to_string()],
                optional_params: vec![],
            },
            ActionSpec {
                id: "sitemap_status".to_string(),
                name: "Sitemap Status".to_string(),
                description: "Current sitemap index state".to_string(),
                required_params: vec![],
                optional_params: vec![],
            },
        ]
    }

    fn auth_fields(&self) -> Vec<AuthField> {
        vec![
            AuthField {
                key: "site_url".to_string(),
                label: "Site URL".to_string(),
                field_type: AuthFieldType::Text,
                required: true,
                description: "Base URL of the site running RankMath".to_string(),
            },
            AuthField {
                key: "api_key".to_string(),
                label: "API Key".to_string(),
                field_type: AuthFieldType::Password,
                required: true,
                description: String::new(),
            },
        ]
    }

    async fn validate_auth(&self, credentials: &Credentials) -> Result<bool> {
        let site_url = credentials.get("site_url").map(String::as_str).unwrap_or("");
        let api_key = credentials.get("api_key").map(String::as_str).unwrap_or("");
        Ok(site_url.starts_with("http") && !api_key.is_empty())
    }

    async fn execute_action(
        &self,
        action_id: &str,
        params: &ActionParams,
        _auth: &Credentials,
    ) -> Result<ActionResult> {
        let result = match action_id {
            "seo_score" => ActionResult::ok(json!({
                "url": params["url"],
                "score": 84,
                "issues": [
                    {"severity": "warning", "message": "Meta description missing focus keyword"},
                ],
            })),
            "sitemap_status" => ActionResult::ok(json!({
                "sitemap_url": "/sitemap_index.xml",
                "entries": 412,
                "last_generated": "2026-08-28T06:00:00Z",
            })),
            other => ActionResult::failure(format!("Unhandled action '{other}'")),
        };
        Ok(result)
    }

    fn triggers(&self) -> Vec<TriggerSpec> {
        vec![TriggerSpec {
            id: "seo_score_changed".to_string(),
            name: "SEO Score Changed".to_string(),
            description: "Fires when the analysis score of a tracked URL changes".to_string(),
        }]
    }

    fn register_trigger(&self, trigger_id: &str) -> bool {
        trigger_id == "seo_score_changed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_declared_and_registrable() {
        let connector = RankMathConnector::new();
        let triggers = connector.triggers();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].id, "seo_score_changed");
        assert!(connector.register_trigger("seo_score_changed"));
        assert!(!connector.register_trigger("page_published"));
    }

    #[tokio::test]
    async fn test_validate_auth_requires_http_site_url() {
        let connector = RankMathConnector::new();
        let mut creds = Credentials::new();
        creds.insert("site_url".to_string(), "https://example.com".to_string());
        creds.insert("api_key".to_string(), "rm_key".to_string());
        assert!(connector.validate_auth(&creds).await.unwrap());

        creds.insert("site_url".to_string(), "example.com".to_string());
        assert!(!connector.validate_auth(&creds).await.unwrap());
    }
}
