use crate::config::ShopifyConfig;
use crate::core::tags::merge_flag_tag;
use crate::domain::model::{OrderEvent, OrderId};
use crate::domain::ports::OrderTagger;
use crate::utils::error::{CheckerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct OrderUpdate<'a> {
    order: OrderTags<'a>,
}

#[derive(Debug, Serialize)]
struct OrderTags<'a> {
    id: &'a OrderId,
    tags: &'a str,
}

/// Shopify Admin REST client for writing order tags.
pub struct ShopifyClient {
    config: ShopifyConfig,
    client: Client,
}

impl ShopifyClient {
    pub fn new(config: ShopifyConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn order_url(&self, base_url: &str, order_id: &OrderId) -> String {
        format!(
            "{}/admin/api/{}/orders/{}.json",
            base_url, self.config.api_version, order_id
        )
    }

    /// Base URL and token, or the name of the first missing setting.
    fn credentials(&self) -> Result<(String, &str)> {
        let base_url =
            self.config
                .store_base_url()
                .ok_or_else(|| CheckerError::ShopifyNotConfigured {
                    field: "SHOPIFY_STORE_DOMAIN".to_string(),
                })?;
        let token = self.config.admin_token.as_deref().ok_or_else(|| {
            CheckerError::ShopifyNotConfigured {
                field: "SHOPIFY_ADMIN_TOKEN".to_string(),
            }
        })?;
        Ok((base_url, token))
    }
}

#[async_trait]
impl OrderTagger for ShopifyClient {
    async fn add_flag(&self, order: &OrderEvent) -> Result<String> {
        let (base_url, token) = self.credentials().inspect_err(|_| {
            tracing::error!("❌ SHOPIFY_STORE_DOMAIN or SHOPIFY_ADMIN_TOKEN is missing");
        })?;
        let order_id = order.id.as_ref().ok_or(CheckerError::MissingOrderId)?;
        let existing = order
            .tags()
            .inspect_err(|e| tracing::error!("❌ Order {}: {}, not updating tags", order_id, e))?;

        let tags = merge_flag_tag(existing, &self.config.flag_tag);
        let url = self.order_url(&base_url, order_id);
        let body = OrderUpdate {
            order: OrderTags {
                id: order_id,
                tags: &tags,
            },
        };

        tracing::debug!("📡 Shopify request: PUT {} tags='{}'", url, tags);

        let response = self
            .client
            .put(&url)
            .header("X-Shopify-Access-Token", token)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!("❌ Shopify tag update failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                "❌ Shopify tag update failed: status {} body {}",
                status,
                body
            );
            return Err(CheckerError::ShopifyStatusError {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            "✅ Added tag '{}' to order {}",
            self.config.flag_tag,
            order_id
        );
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags::DEFAULT_FLAG_TAG;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn config(store_domain: Option<String>) -> ShopifyConfig {
        ShopifyConfig {
            store_domain,
            admin_token: Some("shpat_test".to_string()),
            api_version: "2025-10".to_string(),
            flag_tag: DEFAULT_FLAG_TAG.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn order(value: serde_json::Value) -> OrderEvent {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_add_flag_puts_merged_tags() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/admin/api/2025-10/orders/450789469.json")
                    .header("X-Shopify-Access-Token", "shpat_test")
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "order": {"id": 450789469, "tags": "vip, wholesale, nekorekten-flagged"}
                    }));
                then.status(200).json_body(json!({"order": {"id": 450789469}}));
            })
            .await;

        let client = ShopifyClient::new(config(Some(server.base_url()))).unwrap();
        let tags = client
            .add_flag(&order(json!({"id": 450789469, "tags": "vip,  wholesale"})))
            .await
            .unwrap();

        api_mock.assert_async().await;
        assert_eq!(tags, "vip, wholesale, nekorekten-flagged");
    }

    #[tokio::test]
    async fn test_missing_config_skips_request() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(PUT);
                then.status(200);
            })
            .await;

        let client = ShopifyClient::new(config(None)).unwrap();
        let err = client
            .add_flag(&order(json!({"id": 1, "tags": ""})))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckerError::ShopifyNotConfigured { ref field } if field == "SHOPIFY_STORE_DOMAIN"
        ));

        let mut without_token = config(Some(server.base_url()));
        without_token.admin_token = None;
        let client = ShopifyClient::new(without_token).unwrap();
        let err = client.add_flag(&order(json!({"id": 1}))).await.unwrap_err();

        assert!(matches!(
            err,
            CheckerError::ShopifyNotConfigured { ref field } if field == "SHOPIFY_ADMIN_TOKEN"
        ));
        api_mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_missing_order_id_skips_request() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(PUT);
                then.status(200);
            })
            .await;

        let client = ShopifyClient::new(config(Some(server.base_url()))).unwrap();
        let err = client.add_flag(&order(json!({"tags": "vip"}))).await.unwrap_err();

        assert!(matches!(err, CheckerError::MissingOrderId));
        api_mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_non_string_tags_skip_request() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(PUT);
                then.status(200);
            })
            .await;

        let client = ShopifyClient::new(config(Some(server.base_url()))).unwrap();
        let err = client
            .add_flag(&order(json!({"id": 9, "tags": ["vip", "wholesale"]})))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckerError::InvalidOrderTags { .. }));
        api_mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_retried() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(PUT).path("/admin/api/2025-10/orders/7.json");
                then.status(422)
                    .json_body(json!({"errors": {"tags": ["is invalid"]}}));
            })
            .await;

        let client = ShopifyClient::new(config(Some(server.base_url()))).unwrap();
        let err = client.add_flag(&order(json!({"id": 7}))).await.unwrap_err();

        api_mock.assert_hits_async(1).await;
        match err {
            CheckerError::ShopifyStatusError { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("is invalid"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_string_order_id_is_echoed() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/admin/api/2025-10/orders/1001.json")
                    .json_body(json!({"order": {"id": "1001", "tags": "nekorekten-flagged"}}));
                then.status(200);
            })
            .await;

        let client = ShopifyClient::new(config(Some(server.base_url()))).unwrap();
        client.add_flag(&order(json!({"id": "1001"}))).await.unwrap();

        api_mock.assert_async().await;
    }
}
