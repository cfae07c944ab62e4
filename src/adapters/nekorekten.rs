use crate::config::RegistryConfig;
use crate::core::signal::ResponseShape;
use crate::domain::model::{LookupResult, NormalizedPhone};
use crate::domain::ports::ReportLookup;
use crate::utils::error::{CheckerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

const REPORTS_PATH: &str = "/api/v1/reports";

/// Nekorekten reports API client.
pub struct NekorektenClient {
    config: RegistryConfig,
    client: Client,
}

impl NekorektenClient {
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn reports_url(&self) -> String {
        format!("{}{}", self.config.base_url, REPORTS_PATH)
    }

    async fn fetch_reports(&self, phone: &NormalizedPhone) -> Result<Value> {
        let mut request = self.client.get(self.reports_url()).query(&[
            ("phone", phone.as_str()),
            ("searchMode", self.config.search_mode.as_str()),
        ]);

        if let Some(api_key) = &self.config.api_key {
            request = request.header("Api-Key", api_key);
        }

        tracing::debug!("📡 Nekorekten request: GET {}", self.reports_url());
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Nekorekten response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckerError::RegistryStatusError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

fn log_summary(raw: &Value) {
    let count = raw
        .get("count")
        .map(Value::to_string)
        .unwrap_or_else(|| "n/a".to_string());
    let items = raw
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.len().to_string())
        .unwrap_or_else(|| "n/a".to_string());

    tracing::info!("Nekorekten result summary: count = {}, items length = {}", count, items);
    tracing::debug!("Nekorekten raw: {}", raw);
}

#[async_trait]
impl ReportLookup for NekorektenClient {
    async fn lookup(&self, phone: &NormalizedPhone) -> LookupResult {
        if phone.is_empty() {
            tracing::info!("Nekorekten: no phone, skipping lookup");
            return LookupResult::skipped();
        }

        match self.fetch_reports(phone).await {
            Ok(raw) => {
                log_summary(&raw);
                let has_signal = ResponseShape::classify(&raw).has_signal();
                LookupResult::found(has_signal, raw)
            }
            Err(e) => {
                match &e {
                    CheckerError::RegistryStatusError { status, body } => {
                        tracing::error!("❌ Nekorekten request failed: status {} body {}", status, body);
                    }
                    other => {
                        tracing::error!("❌ Nekorekten request failed: {}", other);
                    }
                }
                LookupResult::failed(e)
            }
        }
    }
}
