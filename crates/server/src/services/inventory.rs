//! Inventory reconciliation: Printify availability → BigCartel quantities.
//!
//! Availability is binary. An enabled Printify variant is pushed to
//! BigCartel as the configured in-stock quantity, a disabled one as zero.
//! Every run pushes every variant; there is no diffing against the previous
//! run and no batching.

use print_bridge_core::{CatalogVariant, Sku};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::bigcartel::BigCartelClient;
use crate::printify::{PrintifyClient, PrintifyError};

/// Outcome counts of one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Variants whose quantity was pushed successfully.
    pub updated: usize,
    /// Variants whose update call failed.
    pub failed: usize,
    /// Variants without a SKU.
    pub skipped: usize,
}

/// Pushes Printify variant availability to BigCartel.
#[derive(Clone)]
pub struct InventoryReconciler {
    printify: PrintifyClient,
    bigcartel: BigCartelClient,
    in_stock_quantity: u32,
}

impl InventoryReconciler {
    #[must_use]
    pub fn new(
        printify: PrintifyClient,
        bigcartel: BigCartelClient,
        in_stock_quantity: u32,
    ) -> Self {
        Self {
            printify,
            bigcartel,
            in_stock_quantity,
        }
    }

    /// Quantity to publish for a variant.
    #[must_use]
    pub const fn availability_quantity(&self, variant: &CatalogVariant) -> u32 {
        if variant.is_enabled {
            self.in_stock_quantity
        } else {
            0
        }
    }

    /// Run one full reconciliation.
    ///
    /// Variants are updated one at a time in catalog order. A failed update
    /// is logged with its SKU and counted; the run moves on to the next
    /// variant.
    ///
    /// # Errors
    ///
    /// Returns an error only if the catalog itself cannot be read, in which
    /// case no updates are attempted.
    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> Result<ReconcileReport, PrintifyError> {
        let products = self.printify.list_products().await?;
        let mut report = ReconcileReport::default();

        for variant in products.iter().flat_map(|product| product.variants.iter()) {
            let Some(sku) = variant.sku() else {
                debug!(variant_id = %variant.id, "Skipping variant without SKU");
                report.skipped += 1;
                continue;
            };

            let quantity = self.availability_quantity(variant);
            if self.push(&sku, quantity).await {
                report.updated += 1;
            } else {
                report.failed += 1;
            }
        }

        info!(
            updated = report.updated,
            failed = report.failed,
            skipped = report.skipped,
            "Inventory reconciliation finished"
        );

        Ok(report)
    }

    async fn push(&self, sku: &Sku, quantity: u32) -> bool {
        match self.bigcartel.update_inventory(sku, quantity).await {
            Ok(()) => {
                debug!(%sku, quantity, "Inventory updated");
                true
            }
            Err(e) => {
                warn!(%sku, quantity, error = %e, "Inventory update failed");
                false
            }
        }
    }
}
