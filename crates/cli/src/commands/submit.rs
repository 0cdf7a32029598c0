//! `bridge-cli submit`: translate an order file and submit it to Printify.
//!
//! Useful for replaying an order whose webhook call failed. The translated
//! request is always printed; `--dry-run` stops before submission.

use std::path::Path;

use print_bridge_server::models::IncomingOrder;
use print_bridge_server::services::{fulfillment, translate};

use super::{CommandError, load_state};

pub async fn run(path: &Path, webhook: bool, dry_run: bool) -> Result<(), CommandError> {
    let text = std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let order = parse_order(&text, webhook)?;

    let state = load_state()?;
    if webhook {
        state.sku_cache().rebuild(state.printify()).await?;
    }

    let request = translate(&order, state.sku_cache())?;
    println!("{}", serde_json::to_string_pretty(&request)?);

    if dry_run {
        tracing::info!("Dry run, order not submitted");
        return Ok(());
    }

    let result = fulfillment::submit(state.printify(), &request).await?;
    println!("{}", serde_json::to_string_pretty(&result.raw)?);

    Ok(())
}

fn parse_order(text: &str, webhook: bool) -> Result<IncomingOrder, serde_json::Error> {
    Ok(if webhook {
        IncomingOrder::Webhook(serde_json::from_str(text)?)
    } else {
        IncomingOrder::Direct(serde_json::from_str(text)?)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_picks_form() {
        let direct = parse_order(r#"{"order_id": "1001", "items": []}"#, false).unwrap();
        assert!(matches!(direct, IncomingOrder::Direct(ref o) if o.items.is_some()));

        let webhook = parse_order(r#"{"id": 42, "items": [{"sku": "X1", "quantity": 1}]}"#, true)
            .unwrap();
        assert!(matches!(webhook, IncomingOrder::Webhook(ref o) if o.items.is_some()));
    }

    #[test]
    fn test_parse_order_rejects_invalid_json() {
        assert!(parse_order("{not json", false).is_err());
    }
}
