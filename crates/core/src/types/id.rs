//! Newtype IDs for identifiers owned by the remote platforms.
//!
//! Printify and BigCartel are not consistent about whether an identifier is
//! sent as a JSON string or a JSON number (Printify product IDs are hex
//! strings, variant IDs are integers, BigCartel order IDs are integers but
//! arrive as strings from some integrations). The `define_remote_id!` macro
//! creates wrappers that accept either form and serialize back in the form
//! they were received, so payloads forwarded to Printify are unchanged.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A raw identifier as it appeared on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Identifier sent as a JSON integer.
    Number(u64),
    /// Identifier sent as a JSON string.
    Text(String),
}

impl RawId {
    /// Returns true if the identifier is an empty (or whitespace-only) string.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Macro to define a type-safe remote ID wrapper.
///
/// Creates a newtype wrapper around [`RawId`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - `From<u64>`, `From<&str>` and `From<String>` implementations
///
/// # Example
///
/// ```rust
/// # use print_bridge_core::define_remote_id;
/// define_remote_id!(ShopId);
///
/// let numeric = ShopId::from(42_u64);
/// let text = ShopId::from("42");
///
/// // Same display form, different wire form
/// assert_eq!(numeric.to_string(), text.to_string());
/// assert_ne!(numeric, text);
/// ```
#[macro_export]
macro_rules! define_remote_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($crate::types::id::RawId);

        impl $name {
            /// Get the underlying raw identifier.
            #[must_use]
            pub const fn as_raw(&self) -> &$crate::types::id::RawId {
                &self.0
            }

            /// Returns true if the identifier is an empty string.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.is_blank()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self($crate::types::id::RawId::Number(id))
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self($crate::types::id::RawId::Text(id.to_owned()))
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self($crate::types::id::RawId::Text(id))
            }
        }
    };
}

// Printify catalog identifiers
define_remote_id!(ProductId);
define_remote_id!(VariantId);

// Order identifier supplied by the caller (BigCartel or the direct integration)
define_remote_id!(OrderRef);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_string_and_number() {
        let product: ProductId = serde_json::from_str("\"5d39b159e7c48c000728c89f\"").unwrap();
        assert_eq!(product.to_string(), "5d39b159e7c48c000728c89f");

        let variant: VariantId = serde_json::from_str("33719").unwrap();
        assert_eq!(variant, VariantId::from(33719_u64));
    }

    #[test]
    fn test_preserves_wire_form() {
        let numeric: VariantId = serde_json::from_str("17").unwrap();
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "17");

        let text: VariantId = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"17\"");
    }

    #[test]
    fn test_blank_detection() {
        assert!(OrderRef::from("  ").is_blank());
        assert!(!OrderRef::from("0").is_blank());
        assert!(!OrderRef::from(0_u64).is_blank());
    }

    #[test]
    fn test_rejects_other_json_types() {
        assert!(serde_json::from_str::<ProductId>("null").is_err());
        assert!(serde_json::from_str::<ProductId>("[1]").is_err());
        assert!(serde_json::from_str::<ProductId>("-4").is_err());
    }
}
