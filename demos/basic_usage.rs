// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for treecfg.
//!
//! This example demonstrates:
//! - Loading a YAML document found by walking up from a directory
//! - Reading scalars, durations, sequences and maps
//! - Overriding any key with an environment variable
//! - Decoding a subtree into a struct
//!
//! To run this example:
//! ```bash
//! # Optionally override some keys
//! export HTTP_PORT="3000"
//! export DATABASE_REPLICAS="db1, db2"
//!
//! cargo run --example basic_usage
//! ```

use serde::Deserialize;
use std::fs;
use treecfg::prelude::*;

const DOCUMENT: &str = r#"
app:
  name: demo
  debug: true
http:
  port: 8080
  timeout: 1m30s
database:
  host: localhost
  port: 5432
  replicas: [primary]
retry:
  backoff_ms: [100, 250, 1000]
"#;

#[derive(Debug, Deserialize)]
struct Database {
    host: String,
    port: u16,
    replicas: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== treecfg: Basic Usage ===\n");

    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("config.yaml"), DOCUMENT)?;
    let nested = dir.path().join("services").join("api");
    fs::create_dir_all(&nested)?;

    // The document lives two levels above the starting directory
    let config = Config::builder().search_from(&nested).build()?;

    println!("--- Scalars ---");
    println!("app.name    = {}", config.get_string("app.name"));
    println!("app.debug   = {}", config.get_bool("app.debug"));
    println!("http.port   = {}", config.get_u16("http.port"));
    println!("http.timeout = {:?}", config.get_duration("http.timeout"));

    println!("\n--- Defaults ---");
    println!(
        "http.workers = {} (default)",
        config.get_u32_or("http.workers", 4)
    );
    println!(
        "app.region   = {:?}",
        config.get_optional_string("app.region")
    );

    println!("\n--- Sequences ---");
    println!(
        "database.replicas = {:?}",
        config.get_string_slice("database.replicas")
    );
    println!(
        "retry.backoff_ms  = {:?}",
        config.get_int_slice("retry.backoff_ms")
    );

    println!("\n--- Maps ---");
    for (name, value) in config.get_map("database") {
        println!("database.{} = {}", name, value);
    }

    println!("\n--- Runtime updates ---");
    config.set("app.name", "renamed");
    println!("app.name    = {}", config.get_string("app.name"));

    println!("\n--- Decoding ---");
    match config.decode_key::<Database>("database")? {
        Some(db) => println!(
            "database: {}:{} with {} replica(s)",
            db.host,
            db.port,
            db.replicas.len()
        ),
        None => println!("database section missing"),
    }

    Ok(())
}
