//! Stock-keeping unit type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Sku`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkuError {
    /// The input is empty or only whitespace.
    #[error("SKU cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("SKU must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A storefront stock-keeping unit.
///
/// SKUs are the join key between a BigCartel product option and a Printify
/// variant. Surrounding whitespace is stripped on parse so that values typed
/// into either platform's admin compare equal.
///
/// ## Examples
///
/// ```
/// use print_bridge_core::Sku;
///
/// let sku = Sku::parse("  TEE-BLK-M ").unwrap();
/// assert_eq!(sku.as_str(), "TEE-BLK-M");
///
/// assert!(Sku::parse("").is_err());
/// assert!(Sku::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

impl Sku {
    /// Maximum accepted SKU length.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `Sku` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or longer than
    /// [`Sku::MAX_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, SkuError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(SkuError::Empty);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(SkuError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Sku {
    type Error = SkuError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Sku> for String {
    fn from(sku: Sku) -> Self {
        sku.0
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
