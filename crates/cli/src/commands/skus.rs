//! `bridge-cli skus`: print the SKU → Printify variant mapping.

use std::fmt::Write as _;

use print_bridge_server::services::SkuSnapshot;

use super::{CommandError, load_state};

pub async fn run(json: bool) -> Result<(), CommandError> {
    let state = load_state()?;
    let count = state.sku_cache().rebuild(state.printify()).await?;
    let snapshot = state.sku_cache().snapshot();

    if json {
        println!("{}", to_json(&snapshot)?);
    } else {
        print!("{}", to_table(&snapshot));
        println!("{count} SKUs mapped");
    }

    Ok(())
}

/// `{sku: {product_id, variant_id}}`, sorted by SKU.
fn to_json(snapshot: &SkuSnapshot) -> Result<String, serde_json::Error> {
    let map: serde_json::Map<String, serde_json::Value> = snapshot
        .sorted()
        .into_iter()
        .map(|(sku, variant)| Ok((sku.to_string(), serde_json::to_value(variant)?)))
        .collect::<Result<_, serde_json::Error>>()?;
    serde_json::to_string_pretty(&map)
}

fn to_table(snapshot: &SkuSnapshot) -> String {
    let entries = snapshot.sorted();
    let width = entries
        .iter()
        .map(|(sku, _)| sku.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (sku, variant) in entries {
        let _ = writeln!(
            out,
            "{sku:<width$}  →  {} / {}",
            variant.product_id, variant.variant_id
        );
    }
    out
}
