//! Bridge services.
//!
//! # Services
//!
//! - `sku_cache` - SKU → Printify variant mapping, rebuilt from the catalog
//! - `translate` - Inbound order → Printify order request
//! - `fulfillment` - Order submission to Printify
//! - `inventory` - Printify availability → BigCartel quantities
//! - `scheduler` - Daily SKU refresh and periodic inventory sync

pub mod fulfillment;
pub mod inventory;
pub mod scheduler;
pub mod sku_cache;
pub mod translate;

pub use inventory::{InventoryReconciler, ReconcileReport};
pub use scheduler::Scheduler;
pub use sku_cache::{SkuCache, SkuSnapshot};
pub use translate::{TranslateError, translate};
