use anyhow::{anyhow, Result};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::{ApiChoice, RunConfig};
use crate::matching::types::DirectoryRecord;
use crate::TARGET_DIRECTORY;

const OPENCORPORATES_URL: &str = "https://api.opencorporates.com/v0.4/companies/search";
const RESULTS_PER_QUERY: usize = 5;

/// Client for the external directory service. Every lookup failure (timeout,
/// non-2xx, malformed payload) is absorbed into "zero candidates"; the run
/// never fails because the directory did.
pub struct DirectoryClient {
    backend: Backend,
    timeout: Duration,
}

enum Backend {
    OpenCorporates(reqwest::Client),
    Secondary {
        #[allow(dead_code)]
        api_key: String,
    },
    Mock,
}

impl DirectoryClient {
    pub fn from_config(config: &RunConfig) -> Self {
        let backend = match config.api_choice {
            ApiChoice::Primary => Backend::OpenCorporates(reqwest::Client::new()),
            ApiChoice::Secondary => Backend::Secondary {
                api_key: config.api_key.clone().unwrap_or_default(),
            },
            ApiChoice::Mock => Backend::Mock,
        };
        DirectoryClient {
            backend,
            timeout: Duration::from_secs_f64(config.lookup_timeout),
        }
    }

    /// Whether lookups leave the process. Only remote backends are subject
    /// to the inter-call rate delay.
    pub fn is_remote(&self) -> bool {
        matches!(self.backend, Backend::OpenCorporates(_))
    }

    /// Look up candidate records for one name. Returns an empty vector on any
    /// failure.
    pub async fn lookup(&self, name: &str) -> Vec<DirectoryRecord> {
        match &self.backend {
            Backend::OpenCorporates(client) => {
                match timeout(self.timeout, search_opencorporates(client, name)).await {
                    Ok(Ok(records)) => {
                        debug!(
                            target: TARGET_DIRECTORY,
                            "Directory returned {} candidates for '{}'", records.len(), name
                        );
                        records
                    }
                    Ok(Err(err)) => {
                        warn!(
                            target: TARGET_DIRECTORY,
                            "Directory lookup failed for '{}': {}", name, err
                        );
                        Vec::new()
                    }
                    Err(_) => {
                        warn!(
                            target: TARGET_DIRECTORY,
                            "Directory lookup timed out for '{}' after {:?}", name, self.timeout
                        );
                        Vec::new()
                    }
                }
            }
            Backend::Secondary { .. } => {
                // The secondary provider integration needs an OAuth2 setup
                // that is not wired in yet; behave as an empty directory.
                warn!(
                    target: TARGET_DIRECTORY,
                    "Secondary directory integration is not available; '{}' gets no candidates",
                    name
                );
                Vec::new()
            }
            Backend::Mock => vec![mock_record(name)],
        }
    }
}

async fn search_opencorporates(
    client: &reqwest::Client,
    name: &str,
) -> Result<Vec<DirectoryRecord>> {
    let response = client
        .get(OPENCORPORATES_URL)
        .query(&[("q", name), ("per_page", &RESULTS_PER_QUERY.to_string())])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("directory returned status {}", response.status()));
    }

    let payload: Value = response.json().await?;
    parse_companies(&payload)
}

fn parse_companies(payload: &Value) -> Result<Vec<DirectoryRecord>> {
    let companies = payload
        .get("results")
        .and_then(|r| r.get("companies"))
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("no companies array in directory response"))?;

    Ok(companies
        .iter()
        .filter_map(|item| item.get("company"))
        .filter_map(parse_company)
        .collect())
}

fn parse_company(value: &Value) -> Option<DirectoryRecord> {
    let name = value.get("name")?.as_str()?;
    let field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(|s| s.to_string())
    };
    Some(DirectoryRecord {
        name: name.to_string(),
        jurisdiction: field("jurisdiction_code"),
        identifier: field("company_number"),
        status: field("current_status"),
        source: "OpenCorporates".to_string(),
    })
}

fn mock_record(name: &str) -> DirectoryRecord {
    DirectoryRecord {
        name: format!("{} Limited", name),
        jurisdiction: Some("gb".to_string()),
        identifier: Some("MOCK123456".to_string()),
        status: Some("Active".to_string()),
        source: "Mock".to_string(),
    }
}
