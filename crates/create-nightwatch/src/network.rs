//! Outbound HTTP: the release check and anonymous usage metrics.
//!
//! Both calls are best effort. They run on a small current-thread runtime,
//! each bounded by [`NETWORK_TIMEOUT`]; callers log failures and move on.

use crate::error::{CliError, CliResult};
use nightwatch_init::{CatalogId, RefinedAnswers};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for any single request
pub const NETWORK_TIMEOUT: Duration = Duration::from_secs(3);

/// Registry document for this crate; its versions share `CARGO_PKG_VERSION`'s scheme
pub const REGISTRY_URL: &str = "https://crates.io/api/v1/crates/create-nightwatch";

/// Analytics collection endpoint
pub const METRICS_URL: &str = "https://www.google-analytics.com/mp/collect";

/// Event name recorded for a finished setup
pub const METRICS_EVENT: &str = "nw_install";

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    #[serde(rename = "crate")]
    krate: PublishedCrate,
}

#[derive(Debug, Deserialize)]
struct PublishedCrate {
    max_version: String,
    #[serde(default)]
    max_stable_version: Option<String>,
}

impl RegistryEntry {
    /// Newest release, preferring stable ones
    fn latest(self) -> String {
        self.krate
            .max_stable_version
            .unwrap_or(self.krate.max_version)
    }
}

/// Body sent to the metrics endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsPayload {
    /// Random id for this run, not tied to the user
    pub client_id: String,
    /// Recorded events
    pub events: Vec<MetricsEvent>,
}

/// One analytics event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsEvent {
    /// Event name
    pub name: String,
    /// Event parameters
    pub params: serde_json::Value,
}

impl MetricsPayload {
    /// Payload describing the choices of one run, without any paths or URLs
    #[must_use]
    pub fn for_answers(client_id: uuid::Uuid, refined: &RefinedAnswers) -> Self {
        let ids = |list: &[nightwatch_init::Browser]| {
            list.iter().map(|b| b.id()).collect::<Vec<_>>().join(",")
        };
        let params = serde_json::json!({
            "testing_type": refined
                .testing_type
                .iter()
                .map(|t| t.id())
                .collect::<Vec<_>>()
                .join(","),
            "language": refined.language.id(),
            "runner": refined.runner.id(),
            "backend": refined.backend.map(CatalogId::id),
            "cloud_provider": refined.cloud_provider.map(CatalogId::id),
            "browsers": ids(refined.local_browsers()),
            "mobile_browsers": ids(refined.local_mobile_browsers()),
            "mobile_platform": refined.mobile_platform.map(CatalogId::id),
            "ui_framework": refined.ui_framework.map(CatalogId::id),
            "add_examples": refined.add_examples,
            "os": std::env::consts::OS,
        });
        Self {
            client_id: client_id.to_string(),
            events: vec![MetricsEvent {
                name: METRICS_EVENT.to_string(),
                params,
            }],
        }
    }
}

/// Blocking wrapper around an async HTTP client
#[derive(Debug)]
pub struct NetworkClient {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
}

impl NetworkClient {
    /// Build the runtime and client
    pub fn new() -> CliResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let client = reqwest::Client::builder()
            .timeout(NETWORK_TIMEOUT)
            .user_agent(concat!("create-nightwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { runtime, client })
    }

    /// Newest version of this crate published to crates.io
    pub fn latest_version(&self) -> CliResult<String> {
        self.runtime.block_on(async {
            let request = self.client.get(REGISTRY_URL).send();
            let response = tokio::time::timeout(NETWORK_TIMEOUT, request)
                .await
                .map_err(|_| CliError::timeout(REGISTRY_URL))??;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(CliError::api(status.as_u16(), body));
            }
            let entry: RegistryEntry = response.json().await?;
            Ok::<_, CliError>(entry.latest())
        })
    }

    /// Post one metrics payload
    pub fn send_metrics(&self, payload: &MetricsPayload) -> CliResult<()> {
        self.runtime.block_on(async {
            let request = self.client.post(METRICS_URL).json(payload).send();
            let response = tokio::time::timeout(NETWORK_TIMEOUT, request)
                .await
                .map_err(|_| CliError::timeout(METRICS_URL))??;
            let status = response.status();
            if status.is_success() {
                Ok::<(), CliError>(())
            } else {
                let body = response.text().await.unwrap_or_default();
                Err(CliError::api(status.as_u16(), body))
            }
        })
    }
}

/// Notice to print when the registry knows a newer release than `current`
#[must_use]
pub fn upgrade_notice(latest: &str, current: &str) -> Option<String> {
    is_newer(latest, current).then(|| {
        format!(
            "create-nightwatch {latest} is available (you have {current}). \
             Run `cargo install create-nightwatch` to update."
        )
    })
}

/// Whether `latest` is a newer dotted version than `current`
#[must_use]
pub fn is_newer(latest: &str, current: &str) -> bool {
    fn parts(version: &str) -> Vec<u64> {
        version
            .trim_start_matches('v')
            .split(['.', '-', '+'])
            .take(3)
            .map(|p| p.parse().unwrap_or(0))
            .collect()
    }
    parts(latest) > parts(current)
}
