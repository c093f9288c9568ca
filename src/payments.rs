//! Payments
//!
//! The fixed payment-method table and the records written at checkout
//! completion. Methods are data, not behavior: each carries flags for which
//! checkout context (point of sale, public catalog) offers it.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::items::LineItem;

/// Number of payment records retained in the session history.
pub const PAYMENT_HISTORY_LIMIT: usize = 10;

/// A payment method identifier.
///
/// The set is fixed: methods are configured upstream, not created at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Cash payment ("Efectivo").
    Cash,
    /// Debit card ("Débito").
    Debit,
    /// Credit card ("Crédito").
    Credit,
    /// Any other method ("Otros").
    Other,
    /// Charge against the customer's balance ("Saldo Cliente").
    CustomerBalance,
    /// Payment link sent to the customer ("Link de Pago").
    PaymentLink,
    /// Online payment ("Pagos online").
    Online,
    /// External card reader ("Lector de tarjeta").
    CardReader,
    /// Deferred payment on store credit ("Crédito (Fiado)").
    StoreCredit,
}

/// Checkout context a payment method can be offered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutContext {
    /// In-store point-of-sale checkout.
    PointOfSale,
    /// Public catalog checkout.
    Catalog,
}

/// The given string names no known payment method.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl PaymentMethod {
    /// All payment methods, in configuration order.
    pub const ALL: [Self; 9] = [
        Self::Cash,
        Self::Debit,
        Self::Credit,
        Self::Other,
        Self::CustomerBalance,
        Self::PaymentLink,
        Self::Online,
        Self::CardReader,
        Self::StoreCredit,
    ];

    /// Stable identifier, as used in persisted records.
    pub fn id(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Debit => "debit",
            Self::Credit => "credit",
            Self::Other => "other",
            Self::CustomerBalance => "customer-balance",
            Self::PaymentLink => "payment-link",
            Self::Online => "online",
            Self::CardReader => "card-reader",
            Self::StoreCredit => "store-credit",
        }
    }

    /// Human-readable name shown on checkout screens.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::Debit => "Débito",
            Self::Credit => "Crédito",
            Self::Other => "Otros",
            Self::CustomerBalance => "Saldo Cliente",
            Self::PaymentLink => "Link de Pago",
            Self::Online => "Pagos online",
            Self::CardReader => "Lector de tarjeta",
            Self::StoreCredit => "Crédito (Fiado)",
        }
    }

    /// Whether the method is offered at the in-store point of sale.
    pub fn enabled_for_pos(self) -> bool {
        matches!(
            self,
            Self::Cash
                | Self::Debit
                | Self::Credit
                | Self::Other
                | Self::CustomerBalance
                | Self::StoreCredit
        )
    }

    /// Whether the method is offered in the public catalog.
    pub fn enabled_for_catalog(self) -> bool {
        matches!(self, Self::Cash)
    }

    /// Whether the method is offered in the given checkout context.
    pub fn available_in(self, context: CheckoutContext) -> bool {
        match context {
            CheckoutContext::PointOfSale => self.enabled_for_pos(),
            CheckoutContext::Catalog => self.enabled_for_catalog(),
        }
    }

    /// All methods offered in the given checkout context, in configuration
    /// order.
    pub fn available(context: CheckoutContext) -> impl Iterator<Item = Self> {
        Self::ALL
            .into_iter()
            .filter(move |method| method.available_in(context))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.id() == s)
            .ok_or_else(|| UnknownPaymentMethod(s.to_owned()))
    }
}

/// A completed payment, snapshotted at checkout completion.
///
/// The item list is an independent copy: mutating the cart afterwards does
/// not alter the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    id: Uuid,
    date: Timestamp,
    total: Decimal,
    method: PaymentMethod,
    items: Vec<LineItem>,
}

impl PaymentRecord {
    pub(crate) fn new(method: PaymentMethod, total: Decimal, items: Vec<LineItem>) -> Self {
        Self {
            id: Uuid::now_v7(),
            date: Timestamp::now(),
            total,
            method,
            items,
        }
    }

    /// Unique record identifier, generated at creation time.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation timestamp.
    pub fn date(&self) -> Timestamp {
        self.date
    }

    /// Cart total at completion time.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Payment method the sale was completed with.
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Snapshot of the cart's line items at completion time.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn pos_context_offers_six_methods() {
        let offered: Vec<_> = PaymentMethod::available(CheckoutContext::PointOfSale).collect();

        assert_eq!(
            offered,
            vec![
                PaymentMethod::Cash,
                PaymentMethod::Debit,
                PaymentMethod::Credit,
                PaymentMethod::Other,
                PaymentMethod::CustomerBalance,
                PaymentMethod::StoreCredit,
            ]
        );
    }

    #[test]
    fn catalog_context_offers_cash_only() {
        let offered: Vec<_> = PaymentMethod::available(CheckoutContext::Catalog).collect();

        assert_eq!(offered, vec![PaymentMethod::Cash]);
    }

    #[test]
    fn identifiers_round_trip_through_from_str() -> TestResult {
        for method in PaymentMethod::ALL {
            assert_eq!(method.id().parse::<PaymentMethod>()?, method);
        }

        Ok(())
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let result = "bitcoin".parse::<PaymentMethod>();

        assert_eq!(result, Err(UnknownPaymentMethod("bitcoin".to_owned())));
    }

    #[test]
    fn serde_uses_kebab_case_identifiers() -> TestResult {
        let json = serde_json::to_string(&PaymentMethod::CustomerBalance)?;

        assert_eq!(json, r#""customer-balance""#);
        assert_eq!(
            serde_json::from_str::<PaymentMethod>(r#""card-reader""#)?,
            PaymentMethod::CardReader
        );

        Ok(())
    }

    #[test]
    fn every_method_has_distinct_identifier() {
        let mut ids: Vec<_> = PaymentMethod::ALL.iter().map(|m| m.id()).collect();

        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), PaymentMethod::ALL.len());
    }
}
