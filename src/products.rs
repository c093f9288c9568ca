//! Products
//!
//! The product shape the cart accepts. Prices are validated once here so cart
//! arithmetic never has to consider negative amounts.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors related to product construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// The given price is negative (product id, price).
    #[error("product {0} has negative price {1}")]
    NegativePrice(String, Decimal),
}

/// A purchasable product, as offered to the cart.
///
/// Name and price are captured by the cart at add time and are not re-synced
/// if the product changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: String,
    name: String,
    price: Decimal,
    image: Option<String>,
}

impl Product {
    /// Create a new product with the given identifier, display name and unit
    /// price.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if `price` is negative. Nothing in this
    /// domain legitimately produces a negative price, so a caller passing one
    /// has a bug and is told so immediately.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, ProductError> {
        let id = id.into();

        if price.is_sign_negative() && !price.is_zero() {
            return Err(ProductError::NegativePrice(id, price));
        }

        Ok(Self {
            id,
            name: name.into(),
            price,
            image: None,
        })
    }

    /// Attach a cosmetic image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Product identifier, unique within a catalog.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Optional image reference.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
