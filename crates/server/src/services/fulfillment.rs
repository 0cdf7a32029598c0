//! Fulfillment submission.
//!
//! One translated order becomes one Printify order-creation call. Nothing
//! is retried: resubmitting the same external ID may create a duplicate
//! order on the Printify side, so the caller decides.

use print_bridge_core::FulfillmentOrderRequest;
use tracing::{error, info, instrument, warn};

use crate::printify::types::FulfillmentOrderResult;
use crate::printify::{PrintifyClient, PrintifyError};

/// Submit a translated order to Printify.
///
/// # Errors
///
/// Returns `PrintifyError::Rejected` with Printify's raw error body, or
/// `PrintifyError::Unreachable` when no response arrived.
#[instrument(
    skip_all,
    fields(
        external_id = %request.external_id,
        lines = request.line_items.len(),
    )
)]
pub async fn submit(
    printify: &PrintifyClient,
    request: &FulfillmentOrderRequest,
) -> Result<FulfillmentOrderResult, PrintifyError> {
    match printify.create_order(request).await {
        Ok(result) => {
            info!(printify_order_id = ?result.id, "Order submitted to Printify");
            Ok(result)
        }
        Err(e @ PrintifyError::Rejected { .. }) => {
            warn!(error = %e, "Printify rejected order");
            Err(e)
        }
        Err(e) => {
            error!(error = %e, "Order submission failed");
            Err(e)
        }
    }
}
