//! Async usage example for the REST response adapter
//!
//! To run this example:
//! ```bash
//! export REST_BASE_URL="http://localhost:8080"  # Optional
//! cargo run --example async_usage
//! ```

use rest_response::RestResponse;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base_url =
        std::env::var("REST_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let client = reqwest::Client::new();

    println!("=== Example 1: Buffered Text ===\n");

    let raw = client.get(format!("{base_url}/")).send().await?;
    let response = RestResponse::from_async(raw).await?;

    println!("Status: {}", response.status());
    for (name, value) in response.headers().iter() {
        println!("  {name}: {value}");
    }
    println!("\n{response}\n");

    println!("=== Example 2: JSON Array ===\n");

    let raw = client.get(format!("{base_url}/items")).send().await?;
    let response = RestResponse::from_async(raw).await?;

    if response.is_success() {
        let items = response.json_array()?;
        println!("{} items", items.len());
    } else {
        println!("Request failed with {}: {response}", response.status());
    }

    Ok(())
}
