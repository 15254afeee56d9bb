//! Basic usage of the Livy client
//!
//! Lists sessions, creates a PySpark session, and deletes it again.
//! Expects a Livy server on localhost:8998; override with the
//! LIVY_HOST and LIVY_PORT environment variables.
//!
//! Run with: cargo run --example basic_usage

use livy_client::{Client, ClientConfig, SessionKind, SessionOptions};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    // Get the server location from the environment
    let host = std::env::var("LIVY_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("LIVY_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8998);

    // Create client
    let client = Client::with_config(ClientConfig {
        host,
        port,
        ..Default::default()
    })?;

    // List what's already running
    info!("Listing first 10 sessions...");
    let sessions = client.list_sessions(None, Some(10)).await?;
    info!("Sessions: {}", sessions);

    // Start a named PySpark session
    info!("Creating a PySpark session...");
    let options = SessionOptions {
        kind: Some(SessionKind::PySpark),
        name: Some("basic-usage-demo".to_string()),
        ..Default::default()
    };
    let created = client.create_session(&options).await?;
    info!("Created: {}", created);

    // Pull the id out of the raw descriptor and clean up after ourselves
    let descriptor: serde_json::Value = serde_json::from_str(&created)?;
    if let Some(id) = descriptor["id"].as_u64() {
        info!("Deleting session {}...", id);
        let acknowledgement = client.delete_session(id as u32).await?;
        info!("Deleted: {}", acknowledgement);
    }

    info!("Example completed successfully!");
    Ok(())
}
