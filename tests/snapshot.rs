//! Assembler and artifact behavior: roster order, per-service failure
//! isolation, timestamping and the overwrite semantics of the writer.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use statusboard::probe::{Probe, ProbeError, Reading, StatuspageProbe};
use statusboard::{assemble, ServiceEntry, Snapshot, Status};

struct FixedProbe {
    status: Status,
    description: &'static str,
}

#[async_trait]
impl Probe for FixedProbe {
    async fn fetch(&self, _client: &Client) -> Result<Reading, ProbeError> {
        Ok(Reading::new(self.status.clone(), self.description))
    }
}

fn fixed(name: &'static str, source: &'static str, status: Status) -> ServiceEntry {
    ServiceEntry {
        name,
        source,
        probe: Box::new(FixedProbe {
            status,
            description: "steady",
        }),
    }
}

#[tokio::test]
async fn assemble_preserves_roster_order_and_stamps_time() {
    let roster = vec![
        fixed("Azure", "https://azure.status.microsoft/", Status::Operational),
        fixed("Azure DevOps", "https://status.dev.azure.com/", Status::Degraded),
        fixed("GitHub", "https://www.githubstatus.com", Status::MajorOutage),
    ];
    let snapshot = assemble(&Client::new(), &roster).await;

    let names: Vec<_> = snapshot.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Azure", "Azure DevOps", "GitHub"]);
    assert_eq!(snapshot.services[1].source, "https://status.dev.azure.com/");

    // The capture timestamp round-trips through JSON as ISO-8601 UTC.
    let value = serde_json::to_value(&snapshot).unwrap();
    let stamp = value["updatedAt"].as_str().unwrap();
    let parsed = DateTime::parse_from_rfc3339(stamp).unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), 0);
}

#[tokio::test]
async fn one_failing_probe_does_not_affect_the_others() {
    // Nothing listens on port 1, so this probe fails with a transport
    // error rather than a mocked response.
    let roster = vec![
        fixed("Azure", "https://azure.status.microsoft/", Status::Operational),
        ServiceEntry {
            name: "GitHub",
            source: "https://www.githubstatus.com",
            probe: Box::new(StatuspageProbe::new("http://127.0.0.1:1")),
        },
        fixed("Brainboard", "https://status.brainboard.co", Status::Operational),
    ];
    let snapshot = assemble(&Client::new(), &roster).await;

    assert_eq!(snapshot.services.len(), 3);
    assert_eq!(snapshot.services[0].status, Status::Operational);
    assert_eq!(snapshot.services[2].status, Status::Operational);

    let failed = &snapshot.services[1];
    assert_eq!(failed.status, Status::Unknown);
    assert!(
        failed.description.starts_with("Fetch error:"),
        "unexpected description: {}",
        failed.description
    );
}

#[tokio::test]
async fn repeated_passes_differ_only_in_timestamp() {
    let roster = || {
        vec![
            fixed("Azure", "https://azure.status.microsoft/", Status::Operational),
            fixed("GitHub", "https://www.githubstatus.com", Status::Degraded),
        ]
    };
    let first = assemble(&Client::new(), &roster()).await;
    let second = assemble(&Client::new(), &roster()).await;

    assert_eq!(
        serde_json::to_value(&first.services).unwrap(),
        serde_json::to_value(&second.services).unwrap()
    );
}

#[tokio::test]
async fn record_fields_serialize_in_artifact_order() {
    let roster = vec![fixed("Azure", "https://azure.status.microsoft/", Status::Operational)];
    let snapshot = assemble(&Client::new(), &roster).await;

    let text = serde_json::to_string_pretty(&snapshot).unwrap();
    let name = text.find("\"name\"").unwrap();
    let status = text.find("\"status\"").unwrap();
    let description = text.find("\"description\"").unwrap();
    let source = text.find("\"source\"").unwrap();
    assert!(name < status && status < description && description < source);
}

#[tokio::test]
async fn write_creates_parents_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("status.json");

    let roster = vec![
        fixed("Azure", "https://azure.status.microsoft/", Status::Operational),
        fixed("GitHub", "https://www.githubstatus.com", Status::Operational),
    ];
    let snapshot = assemble(&Client::new(), &roster).await;
    snapshot.write(&path).unwrap();

    let stored: Snapshot =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored.services.len(), 2);

    // A later pass replaces the artifact wholesale.
    let smaller = assemble(
        &Client::new(),
        &[fixed("Azure", "https://azure.status.microsoft/", Status::Maintenance)],
    )
    .await;
    smaller.write(&path).unwrap();

    let stored: Snapshot =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored.services.len(), 1);
    assert_eq!(stored.services[0].status, Status::Maintenance);
}

#[tokio::test]
async fn passthrough_statuses_survive_the_artifact() {
    let roster = vec![ServiceEntry {
        name: "Odd Vendor",
        source: "https://status.example.com",
        probe: Box::new(FixedProbe {
            status: Status::Other("locally impaired".to_string()),
            description: "steady",
        }),
    }];
    let snapshot = assemble(&Client::new(), &roster).await;

    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(value["services"][0]["status"], "locally impaired");
}
