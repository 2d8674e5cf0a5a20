use clap::Parser;
use statusboard::{assemble, default_roster, REQUEST_TIMEOUT};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let client = reqwest::Client::builder()
        .user_agent(concat!("statusboard/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Couldn't build HTTP client");

    let roster = default_roster();
    let snapshot = assemble(&client, &roster).await;

    info!("Writing snapshot to {}", cli.output.display());
    snapshot
        .write(&cli.output)
        .expect("Couldn't write snapshot");
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path of the snapshot artifact
    #[arg(short, long, default_value = "data/status.json")]
    output: PathBuf,
}
