//! Blocking usage example for the REST response adapter
//!
//! To run this example:
//! ```bash
//! export REST_BASE_URL="http://localhost:8080"  # Optional
//! cargo run --example blocking_usage
//! ```

use std::io::Read;

use rest_response::{ResponseOptions, RestResponse};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base_url =
        std::env::var("REST_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let options = ResponseOptions::from_env()?;

    println!("=== Example 1: JSON Object ===\n");

    let raw = reqwest::blocking::get(format!("{base_url}/package.json"))?;
    let response = RestResponse::from_blocking_with_options(raw, options.clone());

    println!("Status: {} (success: {})", response.status(), response.is_success());
    match response.json_object() {
        Ok(object) => println!("Keys: {}\n", object.keys().cloned().collect::<Vec<_>>().join(", ")),
        Err(e) => println!("Not a JSON object: {e}\n"),
    }

    println!("=== Example 2: Raw Stream ===\n");

    let raw = reqwest::blocking::get(format!("{base_url}/"))?;
    let response = RestResponse::from_blocking_with_options(raw, options.clone());

    if let Some(mut stream) = response.raw_stream() {
        let mut head = vec![0u8; 64];
        let n = stream.read(&mut head)?;
        println!("First {n} bytes: {}", String::from_utf8_lossy(&head[..n]));
    }
    println!("Buffered view after streaming: {} bytes\n", response.bytes()?.len());

    println!("=== Example 3: Never Read ===\n");

    let raw = reqwest::blocking::get(format!("{base_url}/"))?;
    let response = RestResponse::from_blocking_with_options(raw, options);
    println!("Status only: {}", response.status());
    // Dropping the response drains and releases the connection.
    drop(response);

    Ok(())
}
