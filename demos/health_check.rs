//! Health check example.
//!
//! Probes the service's liveness endpoint. No credentials are exchanged, but
//! the client still reads its configuration from the environment.
//!
//! Run with: cargo run --example health_check

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use vendor_data_client::VendorDataClient;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = match VendorDataClient::from_env() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Configuration error: {}", err);
            return ExitCode::from(2);
        }
    };

    if client.health_check().await {
        println!("{} is UP", client.config().base_url);
        ExitCode::SUCCESS
    } else {
        println!("{} is DOWN", client.config().base_url);
        ExitCode::FAILURE
    }
}
