use crate::probe::{AggregateStateProbe, AzureDevOpsProbe, AzureGlobalProbe, Probe, StatuspageProbe};

pub const AZURE_STATUS_PAGE: &str = "https://azure.status.microsoft/";
pub const AZURE_STATUS_FEED: &str = "https://azurestatuscdn.azureedge.net/en-us/status/feed/";
pub const AZURE_DEVOPS_SOURCE: &str = "https://status.dev.azure.com/";
pub const AZURE_DEVOPS_HEALTH: &str =
    "https://status.dev.azure.com/_apis/status/health?api-version=7.1-preview.1";
pub const BRAINBOARD_SOURCE: &str = "https://status.brainboard.co";
pub const BRAINBOARD_STATUS: &str = "https://status.brainboard.co/index.json";

/// Vendors hosted on Statuspage, in display order.
const STATUSPAGE_VENDORS: [(&str, &str); 11] = [
    ("Azure Databricks", "https://status.azuredatabricks.net"),
    ("JFrog", "https://status.jfrog.io"),
    ("Elastic", "https://status.elastic.co"),
    ("Octopus Deploy", "https://status.octopus.com"),
    ("Lucid", "https://status.lucid.co"),
    ("Jira", "https://jira-software.status.atlassian.com"),
    ("Confluence", "https://confluence.status.atlassian.com"),
    ("GitHub", "https://www.githubstatus.com"),
    ("CucumberStudio", "https://status.cucumberstudio.com"),
    ("Fivetran", "https://status.fivetran.com"),
    ("Port", "https://status.port.io"),
];

/// One monitored service: the display name, the public source URL shown
/// in the snapshot, and the probe that knows how to read it.
pub struct ServiceEntry {
    pub name: &'static str,
    pub source: &'static str,
    pub probe: Box<dyn Probe>,
}

/// The full monitored roster in its fixed display order: Azure, Azure
/// DevOps, the Statuspage vendors, then Brainboard.
#[must_use]
pub fn default_roster() -> Vec<ServiceEntry> {
    let mut roster = vec![
        ServiceEntry {
            name: "Azure",
            source: AZURE_STATUS_PAGE,
            probe: Box::new(AzureGlobalProbe::new(AZURE_STATUS_PAGE, AZURE_STATUS_FEED)),
        },
        ServiceEntry {
            name: "Azure DevOps",
            source: AZURE_DEVOPS_SOURCE,
            probe: Box::new(AzureDevOpsProbe::new(AZURE_DEVOPS_HEALTH)),
        },
    ];
    roster.extend(
        STATUSPAGE_VENDORS
            .iter()
            .map(|&(name, base)| ServiceEntry {
                name,
                source: base,
                probe: Box::new(StatuspageProbe::new(base)),
            }),
    );
    roster.push(ServiceEntry {
        name: "Brainboard",
        source: BRAINBOARD_SOURCE,
        probe: Box::new(AggregateStateProbe::new(BRAINBOARD_STATUS)),
    });
    roster
}
