//! In-memory SKU → Printify variant mapping.
//!
//! The cache publishes an immutable [`SkuSnapshot`] behind an
//! [`ArcSwap`]. A rebuild reads the whole Printify catalog, builds a new
//! snapshot off to the side, and swaps it in with a single store. Readers
//! never block and always see one complete snapshot.
//!
//! A failed rebuild leaves the published snapshot untouched.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use print_bridge_core::{CatalogProduct, Sku, VariantRef};
use tracing::{info, instrument, warn};

use crate::printify::{PrintifyClient, PrintifyError};

/// An immutable SKU mapping table.
#[derive(Debug, Clone, Default)]
pub struct SkuSnapshot {
    mappings: HashMap<Sku, VariantRef>,
    refreshed_at: Option<DateTime<Utc>>,
    duplicates: usize,
}

impl SkuSnapshot {
    /// Build a snapshot from a catalog.
    ///
    /// Variants are scanned in catalog order (products in page order, then
    /// variants in product order). When two variants share a SKU, the one
    /// scanned later wins. Variants with a blank SKU are skipped.
    #[must_use]
    pub fn from_catalog(products: &[CatalogProduct], refreshed_at: DateTime<Utc>) -> Self {
        let mut mappings = HashMap::new();
        let mut duplicates = 0;

        for (sku, variant_ref) in products.iter().flat_map(|product| product.sku_refs()) {
            if mappings.insert(sku, variant_ref).is_some() {
                duplicates += 1;
            }
        }

        Self {
            mappings,
            refreshed_at: Some(refreshed_at),
            duplicates,
        }
    }

    /// Look up a SKU.
    #[must_use]
    pub fn get(&self, sku: &Sku) -> Option<&VariantRef> {
        self.mappings.get(sku)
    }

    /// Number of mapped SKUs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Whether the snapshot has no mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// When this snapshot was built, or `None` for the startup placeholder.
    #[must_use]
    pub const fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// How many SKUs were overwritten by a later variant during the build.
    #[must_use]
    pub const fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Mappings sorted by SKU.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&Sku, &VariantRef)> {
        let mut entries: Vec<_> = self.mappings.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Shared handle to the published SKU snapshot.
///
/// Cheaply cloneable; all clones observe the same published snapshot.
#[derive(Clone, Default)]
pub struct SkuCache {
    published: Arc<ArcSwap<SkuSnapshot>>,
}

impl SkuCache {
    /// Create an empty, never-refreshed cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that starts with the given snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: SkuSnapshot) -> Self {
        Self {
            published: Arc::new(ArcSwap::from_pointee(snapshot)),
        }
    }

    /// Resolve a SKU against the current snapshot. Never does I/O.
    #[must_use]
    pub fn lookup(&self, sku: &Sku) -> Option<VariantRef> {
        self.published.load().get(sku).cloned()
    }

    /// The currently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<SkuSnapshot> {
        self.published.load_full()
    }

    /// Whether a rebuild has succeeded at least once.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.published.load().refreshed_at().is_some()
    }

    /// Replace the published snapshot.
    pub fn publish(&self, snapshot: SkuSnapshot) {
        self.published.store(Arc::new(snapshot));
    }

    /// Rebuild from the Printify catalog and publish the result.
    ///
    /// On failure the previous snapshot stays published and the error is
    /// returned after being logged.
    ///
    /// # Errors
    ///
    /// Returns the catalog fetch error.
    #[instrument(skip_all)]
    pub async fn rebuild(&self, printify: &PrintifyClient) -> Result<usize, PrintifyError> {
        let products = match printify.list_products().await {
            Ok(products) => products,
            Err(e) => {
                warn!(
                    error = %e,
                    kept = self.published.load().len(),
                    "SKU cache rebuild failed, keeping last good mappings"
                );
                return Err(e);
            }
        };

        let snapshot = SkuSnapshot::from_catalog(&products, Utc::now());
        let count = snapshot.len();

        if snapshot.duplicates() > 0 {
            warn!(
                duplicates = snapshot.duplicates(),
                "Catalog contains duplicate SKUs, later variants win"
            );
        }

        self.publish(snapshot);
        info!(products = products.len(), skus = count, "SKU cache rebuilt");

        Ok(count)
    }
}
