//! Google Ads connector — campaign listings and performance reports.

use crate::connector::Connector;
use crate::types::{
    ActionParams, ActionResult, ActionSpec, AuthField, AuthFieldType, ConnectorDescriptor,
    Credentials,
};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

pub struct GoogleAdsConnector;

impl GoogleAdsConnector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoogleAdsConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for GoogleAdsConnector {
    fn descriptor(&self) -> ConnectorDescriptor {
        ConnectorDescriptor {
            id: "google_ads".to_string(),
            name: "Google Ads".to_string(),
            description: "Campaign management and performance reporting".to_string(),
            version: "1.0.0".to_string(),
            category: "ads".to_string(),
            brand_color: "#4285f4".to_string(),
            website: "https://ads.google.com".to_string(),
        }
    }

    fn actions(&self) -> Vec<ActionSpec> {
        vec![
            ActionSpec {
                id: "list_campaigns".to_string(),
                name: "List Campaigns".to_string(),
                description: "List campaigns in the customer account".to_string(),
                required_params: vec![],
                optional_params: vec!["status".to_string()],
            },
            ActionSpec {
                id: "campaign_performance".to_string(),
                name: "Campaign Performance".to_string(),
                description: "Performance metrics for one campaign".to_string(),
                required_params: vec!["campaign_id".to_string()],
                optional_params: vec!["date_range".to_string()],
            },
        ]
    }

    fn auth_fields(&self) -> Vec<AuthField> {
        vec![
            AuthField {
                key: "client_id".to_string(),
                label: "OAuth Client ID".to_string(),
                field_type: AuthFieldType::Text,
                required: true,
                description: "OAuth 2.0 client ID from Google Cloud Console".to_string(),
            },
            AuthField {
                key: "client_secret".to_string(),
                label: "OAuth Client Secret".to_string(),
                field_type: AuthFieldType::Password,
                required: true,
                description: String::new(),
            },
            AuthField {
                key: "refresh_token".to_string(),
                label: "Refresh Token".to_string(),
                field_type: AuthFieldType::Password,
                required: true,
                description: "Long-lived refresh token from the OAuth consent flow".to_string(),
            },
            AuthField {
                key: "developer_token".to_string(),
                label: "Developer Token".to_string(),
                field_type: AuthFieldType::Password,
                required: true,
                description: String::new(),
            },
            AuthField {
                key: "customer_id".to_string(),
                label: "Customer ID".to_string(),
                field_type: AuthFieldType::Text,
                required: true,
                description: "Ten-digit account id, digits only".to_string(),
            },
        ]
    }

    async fn validate_auth(&self, credentials: &Credentials) -> Result<bool> {
        let required_present = self
            .auth_fields()
            .iter()
            .filter(|f| f.required)
            .all(|f| credentials.get(&f.key).is_some_and(|v| !v.is_empty()));
        if !required_present {
            return Ok(false);
        }
        // Customer ids are ten digits, optionally dash-separated.
        let customer_id = credentials["customer_id"].replace('-', "");
        Ok(customer_id.len() == 10 && customer_id.chars().all(|c| c.is_ascii_digit()))
    }

    async fn execute_action(
        &self,
        action_id: &str,
        params: &ActionParams,
        _auth: &Credentials,
    ) -> Result<ActionResult> {
        let result = match action_id {
            "list_campaigns" => ActionResult::ok(json!({
                "status_filter": params.get("status").cloned().unwrap_or_else(|| json!("all")),
                "campaigns": [
                    {"id": "2001", "name": "Brand - Search", "status": "enabled"},
                    {"id": "2002", "name": "Competitors - Search", "status": "paused"},
                ],
            })),
            "campaign_performance" => ActionResult::ok(json!({
                "campaign_id": params["campaign_id"],
                "date_range": params.get("date_range").cloned().unwrap_or_else(|| json!("last_30_days")),
                "impressions": 48_210,
                "clicks": 1_932,
                "cost_micros": 1_240_000_000u64,
                "conversions": 87,
            })),
            other => ActionResult::failure(format!("Unhandled action '{other}'")),
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_creds() -> Credentials {
        let mut c = Credentials::new();
        c.insert("client_id".to_string(), "abc.apps.googleusercontent.com".to_string());
        c.insert("client_secret".to_string(), "secret".to_string());
        c.insert("refresh_token".to_string(), "1//refresh".to_string());
        c.insert("developer_token".to_string(), "devtok".to_string());
        c.insert("customer_id".to_string(), "123-456-7890".to_string());
        c
    }

    #[test]
    fn test_descriptor_and_fields() {
        let connector = GoogleAdsConnector::new();
        assert_eq!(connector.descriptor().id, "google_ads");
        let keys: Vec<String> = connector.auth_fields().into_iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec!["client_id", "client_secret", "refresh_token", "developer_token", "customer_id"]
        );
    }

    #[tokio::test]
    async fn test_validate_auth_requires_all_fields() {
        let connector = GoogleAdsConnector::new();
        assert!(connector.validate_auth(&full_creds()).await.unwrap());

        let mut missing = full_creds();
        missing.remove("developer_token");
        assert!(!connector.validate_auth(&missing).await.unwrap());

        let mut bad_id = full_creds();
        bad_id.insert("customer_id".to_string(), "not-a-number".to_string());
        assert!(!connector.validate_auth(&bad_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_campaigns_defaults_status() {
        let connector = GoogleAdsConnector::new();
        let result = connector
            .execute_action("list_campaigns", &ActionParams::new(), &Credentials::new())
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.data.unwrap()["status_filter"], "all");
    }
}
