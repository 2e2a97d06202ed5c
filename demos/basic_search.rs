//! Basic search example.
//!
//! This example authenticates with client credentials taken from the
//! environment and runs one case search.
//!
//! Required: VENDOR_BASE_URL, VENDOR_CLIENT_ID, VENDOR_CLIENT_SECRET,
//! VENDOR_TOKEN_URL. Set VENDOR_DEBUG=true and RUST_LOG=debug to see each
//! attempt and retry.
//!
//! Run with: cargo run --example basic_search -- Doe John

use tracing_subscriber::EnvFilter;
use vendor_data_client::{SearchRequest, VendorDataClient};

#[tokio::main]
async fn main() -> vendor_data_client::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let last_name = args.next().unwrap_or_else(|| "Doe".to_string());
    let first_name = args.next().unwrap_or_default();

    let client = VendorDataClient::from_env()?;
    println!("Searching {} ...", client.config().base_url);

    let request = SearchRequest::new()
        .last_name(last_name)
        .first_name(first_name)
        .include_charges(true)
        .include_dockets(true)
        .page_size(25);

    let response = client.search(&request).await?;

    println!(
        "Found {:?} record(s){}",
        response.total_records,
        if response.total_records_is_estimate == Some(true) {
            " (estimate)"
        } else {
            ""
        }
    );
    for warning in &response.warnings {
        println!("  warning: {}", warning);
    }

    for record in &response.data {
        println!(
            "  - {} [{}] filed {:?}, status {}",
            record.case_number.as_deref().unwrap_or("?"),
            record.county.as_deref().unwrap_or("unknown county"),
            record.filing_date,
            record.case_status.as_deref().unwrap_or("unknown"),
        );
        for charge in &record.charges {
            println!(
                "      charge {}: {}",
                charge.court_statute_number().unwrap_or("?"),
                charge.court_statute_description().unwrap_or("")
            );
        }
    }

    if response.has_more() {
        println!("\nMore results available; request page {:?}.", response.page.map(|p| p + 1));
    }

    Ok(())
}
