use crate::status::{normalize, Status};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use rss::{Channel, Item};
use serde::Deserialize;
use thiserror::Error;

/// Bound on every status-endpoint request.
pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(25);

/// Placeholder used when a vendor omits its human-readable description.
pub const NO_DESCRIPTION: &str = "—";

/// How far back an RSS incident still counts as active.
pub const RECENCY_WINDOW_HOURS: i64 = 6;

const NO_ACTIVE_EVENTS_SENTINEL: &str = "There are currently no active events";

/// One observation of a service's health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub status: Status,
    pub description: String,
}

impl Reading {
    pub fn new(status: Status, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Feed(#[from] rss::Error),
}

/// One way of asking a vendor about its health.
///
/// Implementations reduce whatever shape the vendor exposes to a single
/// `Reading`. A returned error is contained by the caller, which records
/// that service as `Unknown` instead of aborting the pass.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn fetch(&self, client: &Client) -> Result<Reading, ProbeError>;
}

fn or_placeholder(description: String) -> String {
    if description.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        description
    }
}

/// Vendors hosted on Statuspage expose an aggregate indicator at
/// `/api/v2/summary.json`.
pub struct StatuspageProbe {
    base: String,
}

impl StatuspageProbe {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

#[derive(Deserialize, Default)]
struct StatuspageSummary {
    #[serde(default)]
    status: StatuspageStatus,
}

#[derive(Deserialize, Default)]
struct StatuspageStatus {
    #[serde(default)]
    indicator: String,
    #[serde(default)]
    description: String,
}

#[async_trait]
impl Probe for StatuspageProbe {
    async fn fetch(&self, client: &Client) -> Result<Reading, ProbeError> {
        let url = format!("{}/api/v2/summary.json", self.base.trim_end_matches('/'));
        let summary: StatuspageSummary = client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(Reading::new(
            normalize(&summary.status.indicator),
            or_placeholder(summary.status.description),
        ))
    }
}

/// Azure DevOps publishes a health rollup on a versioned API.
pub struct AzureDevOpsProbe {
    endpoint: String,
}

impl AzureDevOpsProbe {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Deserialize, Default)]
struct DevOpsHealth {
    #[serde(default)]
    status: DevOpsRollup,
}

#[derive(Deserialize, Default)]
struct DevOpsRollup {
    #[serde(default)]
    health: String,
    #[serde(default)]
    message: String,
}

#[async_trait]
impl Probe for AzureDevOpsProbe {
    async fn fetch(&self, client: &Client) -> Result<Reading, ProbeError> {
        let health: DevOpsHealth = client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(Reading::new(
            normalize(&health.status.health),
            or_placeholder(health.status.message),
        ))
    }
}

/// Azure's global page has no JSON API, so this probe works in two
/// stages: scrape the public status page for its "no active events"
/// banner, and fall back to the incident-history RSS feed when the page
/// is unreachable or the banner is absent.
pub struct AzureGlobalProbe {
    status_page: String,
    feed: String,
}

impl AzureGlobalProbe {
    pub fn new(status_page: impl Into<String>, feed: impl Into<String>) -> Self {
        Self {
            status_page: status_page.into(),
            feed: feed.into(),
        }
    }

    async fn no_active_events(&self, client: &Client) -> Result<bool, ProbeError> {
        let html = client.get(&self.status_page).send().await?.text().await?;
        Ok(html.contains(NO_ACTIVE_EVENTS_SENTINEL))
    }
}

#[async_trait]
impl Probe for AzureGlobalProbe {
    async fn fetch(&self, client: &Client) -> Result<Reading, ProbeError> {
        // A failed page fetch is not conclusive either way, so it falls
        // through to the feed instead of failing the probe.
        match self.no_active_events(client).await {
            Ok(true) => return Ok(Reading::new(Status::Operational, "No active events")),
            Ok(false) | Err(_) => {}
        }
        let body = client
            .get(&self.feed)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let channel = Channel::read_from(&body[..])?;
        let cutoff = Utc::now() - Duration::hours(RECENCY_WINDOW_HOURS);
        match first_recent_item(&channel, cutoff) {
            Some(item) => Ok(Reading::new(
                Status::Degraded,
                item.title().unwrap_or("Recent incident"),
            )),
            None => Ok(Reading::new(
                Status::Operational,
                "No recent incidents in RSS",
            )),
        }
    }
}

/// First item in feed order published at or after `cutoff`.
fn first_recent_item(channel: &Channel, cutoff: DateTime<Utc>) -> Option<&Item> {
    channel
        .items()
        .iter()
        .find(|item| published_at(item).is_some_and(|published| published >= cutoff))
}

/// Publication time of an RSS item, if present and parseable.
fn published_at(item: &Item) -> Option<DateTime<Utc>> {
    let date = item.pub_date()?;
    DateTime::parse_from_rfc2822(date)
        .ok()
        .map(|published| published.with_timezone(&Utc))
}

/// Bespoke status feed exposing a `data.attributes.aggregate_state`
/// field.
pub struct AggregateStateProbe {
    endpoint: String,
}

impl AggregateStateProbe {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Probe for AggregateStateProbe {
    async fn fetch(&self, client: &Client) -> Result<Reading, ProbeError> {
        let payload: serde_json::Value = client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        // Missing intermediate keys read as an empty state.
        let state = payload
            .pointer("/data/attributes/aggregate_state")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        let shown = if state.is_empty() { NO_DESCRIPTION } else { state };
        Ok(Reading::new(
            normalize(state),
            format!("Aggregate state: {shown}"),
        ))
    }
}
