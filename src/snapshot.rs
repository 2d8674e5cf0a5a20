use crate::probe::Reading;
use crate::roster::ServiceEntry;
use crate::status::Status;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// The health of one monitored service at capture time.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServiceRecord {
    pub name: String,
    pub status: Status,
    pub description: String,
    pub source: String,
}

/// The artifact produced by one collection pass.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Snapshot {
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub services: Vec<ServiceRecord>,
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("couldn't serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("couldn't write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

/// Read every service in the roster, in order, and stamp the result.
///
/// Probes run strictly sequentially. A failing probe downgrades that one
/// service to `Unknown` with the error in its description; it never
/// aborts the pass or affects the other records.
pub async fn assemble(client: &Client, roster: &[ServiceEntry]) -> Snapshot {
    let mut services = Vec::with_capacity(roster.len());
    for entry in roster {
        info!("Reading status of {}", entry.name);
        let reading = match entry.probe.fetch(client).await {
            Ok(reading) => reading,
            Err(e) => {
                warn!("Probe for {} failed: {e}", entry.name);
                Reading::new(Status::Unknown, format!("Fetch error: {e}"))
            }
        };
        services.push(ServiceRecord {
            name: entry.name.to_string(),
            status: reading.status,
            description: reading.description,
            source: entry.source.to_string(),
        });
    }
    Snapshot {
        updated_at: Utc::now(),
        services,
    }
}

impl Snapshot {
    /// Overwrite `path` with the pretty-printed snapshot, creating any
    /// missing parent directories. The previous artifact is replaced
    /// wholesale.
    pub fn write(&self, path: &Path) -> Result<(), WriteError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
