//! Order Tracker Server Example
//!
//! Serves the order API with in-memory order storage and signatures written
//! to disk. Set `TRACKER_CONFIG` to a YAML file to override the defaults,
//! e.g. `demos/tracker_server/config/tracker.yaml`.

use anyhow::Result;
use order_tracker::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("TRACKER_CONFIG") {
        Ok(path) => TrackerConfig::from_yaml_file(&path)?,
        Err(_) => TrackerConfig::default_config(),
    };

    println!("🚀 Starting order tracker on http://{}", config.server.bind);
    println!("\n📚 Routes:");
    println!("    GET    /health                       - Health check");
    println!("    POST   /orders                       - Create an order");
    println!("    GET    /orders/search?status=...     - Search orders");
    println!("    GET    /orders/{{id}}                  - Get an order");
    println!("    PATCH  /orders/{{id}}                  - Update an order");
    println!("    DELETE /orders/{{id}}                  - Delete an order");
    println!("    PATCH  /orders/{{id}}/signature        - Upload a signature (multipart)");
    println!(
        "\n🖊  Signatures are stored in {}",
        config.signatures.directory.display()
    );

    ServerBuilder::new()
        .with_config(config)
        .with_order_store(InMemoryOrderStore::new())
        .serve()
        .await
}
