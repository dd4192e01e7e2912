use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GeneratorResult;
use crate::types::FixtureRecord;

/// Where fixture and result records come from. Production uses the
/// Full-Time API; tests substitute canned payloads.
#[allow(async_fn_in_trait)]
pub trait FixtureSource {
    async fn fetch_fixtures(&self) -> GeneratorResult<Vec<FixtureRecord>>;
    async fn fetch_results(&self) -> GeneratorResult<Vec<FixtureRecord>>;
}

/// HTTP client for the Full-Time fixtures/results endpoints.
pub struct FullTimeClient {
    client: reqwest::Client,
    base_url: String,
    team_id: String,
    team_name: String,
}

impl FullTimeClient {
    pub fn new(config: &GeneratorConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(Duration::from_secs(config.http.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            team_id: config.api.team_id.clone(),
            team_name: config.api.team_name.clone(),
        })
    }

    async fn fetch(&self, endpoint: &str) -> GeneratorResult<Vec<FixtureRecord>> {
        let url = format!("{}/{}/{}", self.base_url, endpoint, self.team_id);
        debug!("Fetching {} for {}", url, self.team_name);

        let response = self
            .client
            .get(&url)
            .query(&[("teamName", self.team_name.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let records: Vec<FixtureRecord> = response.json().await?;
        debug!("Fetched {} records from {}", records.len(), endpoint);
        Ok(records)
    }
}

impl FixtureSource for FullTimeClient {
    async fn fetch_fixtures(&self) -> GeneratorResult<Vec<FixtureRecord>> {
        self.fetch("Fixtures").await
    }

    async fn fetch_results(&self) -> GeneratorResult<Vec<FixtureRecord>> {
        self.fetch("Results").await
    }
}
