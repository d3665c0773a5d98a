//! Benchmark of field discovery and CSV rendering
//!
//! Exports a synthetic catalogue of heterogeneous product documents and
//! reports how the time splits between discovery and serialization.

use docsv::{discover, ExportConfig, TabularSerializer};
use serde_json::{json, Value};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    println!("=== docsv Export Benchmark ===\n");

    let test_data = generate_catalogue(10_000);
    let config = ExportConfig::default();

    // Phase 1: discovery
    println!("Discovering fields across {} documents...", test_data.len());
    let start = Instant::now();
    let discovery = discover(&test_data, &config);
    let discovery_duration = start.elapsed();

    println!("Time: {:?}", discovery_duration);
    println!("Columns discovered: {}", discovery.fields.len());
    println!(
        "Average per record: {:.2}us\n",
        discovery_duration.as_micros() as f64 / test_data.len() as f64
    );

    // Phase 2: rendering
    println!("Rendering CSV...");
    let serializer = TabularSerializer::new(config);
    let start = Instant::now();
    let text = serializer.render(&discovery.records, &discovery.fields)?;
    let render_duration = start.elapsed();

    println!("Time: {:?}", render_duration);
    println!("Output size: {} bytes", text.len());
    println!(
        "Average per record: {:.2}us\n",
        render_duration.as_micros() as f64 / test_data.len() as f64
    );

    println!("=== Summary ===\n");
    let total = discovery_duration + render_duration;
    println!("Discovery: {:?}", discovery_duration);
    println!("Rendering: {:?}", render_duration);
    println!("Total:     {:?}", total);
    println!(
        "Throughput: {:.0} records/s",
        test_data.len() as f64 / total.as_secs_f64()
    );

    Ok(())
}

/// Products whose shapes drift: optional attributes, variant arrays and
/// occasional extra nesting
fn generate_catalogue(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let mut product = json!({
                "_id": format!("{:024x}", i),
                "code": format!("SKU-{}", i),
                "name": {"en": format!("Product {}", i), "fr": format!("Produit {}", i)},
                "price": {"ati": {"normal": 10.0 + (i % 50) as f64}, "et": {"normal": 8.0}},
                "categories": ["home", "kitchen"],
                "active": i % 7 != 0,
            });

            if i % 3 == 0 {
                product["variants"] = json!([
                    {"sku": format!("{}-S", i), "size": "S", "stock": i % 10},
                    {"sku": format!("{}-M", i), "size": "M", "weight": 1.5}
                ]);
            }
            if i % 11 == 0 {
                product["attributes"] = json!({
                    "material": "oak",
                    "dimensions": {"w": 40, "h": 80, "d": 35}
                });
            }
            if i % 101 == 0 {
                product["reviews"] = json!([{"rating": 5, "title": "Great \"value\"; recommended"}]);
            }

            product
        })
        .collect()
}
