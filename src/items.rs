//! Line items
//!
//! One product entry and its quantity within a cart. Field names in the
//! serialized form match the persisted session documents (`unitPrice` etc.),
//! so carts written by earlier sessions rehydrate unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::Product;

/// A product entry and its quantity within a cart.
///
/// Name and unit price are snapshots taken when the product was added; the
/// quantity is always at least 1 (a cart drops the line instead of holding a
/// zero quantity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: String,
    name: String,
    #[serde(rename = "unitPrice")]
    unit_price: Decimal,
    quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl LineItem {
    /// Create a line item for one unit of the given product.
    pub fn for_product(product: &Product) -> Self {
        Self {
            id: product.id().to_owned(),
            name: product.name().to_owned(),
            unit_price: product.price(),
            quantity: 1,
            image: product.image().map(str::to_owned),
        }
    }

    /// Identifier of the underlying product, unique within a cart.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name captured at add time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price captured at add time.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Number of units of this product in the cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Optional image reference, cosmetic only.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Price of this line: unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }
}
