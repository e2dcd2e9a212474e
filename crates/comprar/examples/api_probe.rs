//! Quick diagnostic against the live search API.
//!
//! Prints the raw envelope for one search call so API drift is visible
//! without running the whole suite.
//!
//! Run with: `cargo run --example api_probe`

use comprar::prelude::*;

#[tokio::main]
async fn main() -> ComprarResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "comprar=debug".into()),
        )
        .init();

    let client = ApiClient::from_env();
    let response = client.search_product("top").await?;

    println!("Status Code: {}", response.status_code);
    println!("Success: {}", response.success);
    println!("Headers:");
    for (name, value) in &response.headers {
        println!("  {name}: {value}");
    }

    match &response.data {
        Payload::Json(value) => {
            println!("JSON Response:");
            println!("{}", serde_json::to_string_pretty(value)?);
            if let Some(count) = response.data.array_len("products") {
                println!("Products matching 'top': {count}");
            }
        }
        Payload::Text(text) => {
            println!("Not a JSON response:");
            println!("{text}");
        }
    }

    Ok(())
}
