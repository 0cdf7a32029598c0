//! Printify catalog records.
//!
//! Only the fields the bridge reads are modelled; everything else in the
//! `products.json` response is ignored during deserialization.

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::sku::Sku;

/// A product in the Printify shop catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Printify product ID.
    pub id: ProductId,
    /// Product title (informational only).
    #[serde(default)]
    pub title: String,
    /// Purchasable variants in catalog order.
    #[serde(default)]
    pub variants: Vec<CatalogVariant>,
}

/// A purchasable configuration (size, color, ...) of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogVariant {
    /// Printify variant ID.
    pub id: VariantId,
    /// Storefront SKU as entered in Printify. May be empty.
    #[serde(default)]
    pub sku: String,
    /// Whether the variant is enabled for sale in the shop.
    #[serde(default)]
    pub is_enabled: bool,
}

impl CatalogVariant {
    /// The variant's SKU, or `None` if it is blank.
    #[must_use]
    pub fn sku(&self) -> Option<Sku> {
        Sku::parse(&self.sku).ok()
    }
}

impl CatalogProduct {
    /// Iterate `(sku, variant_ref)` pairs for every variant that has a SKU,
    /// in catalog order.
    pub fn sku_refs(&self) -> impl Iterator<Item = (Sku, VariantRef)> + '_ {
        self.variants.iter().filter_map(|variant| {
            variant.sku().map(|sku| {
                (
                    sku,
                    VariantRef {
                        product_id: self.id.clone(),
                        variant_id: variant.id.clone(),
                    },
                )
            })
        })
    }
}

/// The Printify coordinates a storefront SKU resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantRef {
    /// Printify product ID.
    pub product_id: ProductId,
    /// Printify variant ID.
    pub variant_id: VariantId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_printify_product() {
        let json = r#"{
            "id": "5d39b159e7c48c000728c89f",
            "title": "Classic Tee",
            "visible": true,
            "variants": [
                {"id": 17390, "sku": "TEE-BLK-S", "price": 2000, "is_enabled": true},
                {"id": 17391, "sku": "", "price": 2000, "is_enabled": false}
            ]
        }"#;

        let product: CatalogProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.variants.len(), 2);
        assert!(product.variants[0].is_enabled);
        assert_eq!(product.variants[1].sku(), None);
    }

    #[test]
    fn test_sku_refs_skips_blank_skus() {
        let product = CatalogProduct {
            id: ProductId::from("p1"),
            title: String::new(),
            variants: vec![
                CatalogVariant {
                    id: VariantId::from(1_u64),
                    sku: "A".to_string(),
                    is_enabled: true,
                },
                CatalogVariant {
                    id: VariantId::from(2_u64),
                    sku: "  ".to_string(),
                    is_enabled: true,
                },
            ],
        };

        let refs: Vec<_> = product.sku_refs().collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].0.as_str(), "A");
        assert_eq!(refs[0].1.product_id, ProductId::from("p1"));
        assert_eq!(refs[0].1.variant_id, VariantId::from(1_u64));
    }
}
