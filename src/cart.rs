//! Cart store
//!
//! The authoritative in-memory cart for one session: line items, derived
//! totals, the recent-payment history, change notification and persistence.
//! Totals are recomputed from the line items on every read, so they can never
//! drift from the list they are derived from.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use tracing::warn;
use uuid::Uuid;

use crate::{
    items::LineItem,
    payments::{PAYMENT_HISTORY_LIMIT, PaymentMethod, PaymentRecord},
    products::Product,
    storage::{CART_KEY, KeyValueStore, PAYMENTS_KEY},
};

/// A change to the cart, delivered to registered listeners after the mutation
/// has been applied and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added, or an existing line's quantity incremented.
    ItemAdded {
        /// Product identifier of the affected line.
        id: String,
    },
    /// A line item was removed.
    ItemRemoved {
        /// Product identifier of the removed line.
        id: String,
    },
    /// A line item's quantity was set to a new value.
    QuantityUpdated {
        /// Product identifier of the affected line.
        id: String,
        /// The new quantity.
        quantity: u32,
    },
    /// All line items were removed.
    Cleared,
    /// A payment record was written to the history.
    PaymentRecorded {
        /// Identifier of the new record.
        id: Uuid,
    },
}

type Listener = Box<dyn FnMut(&CartEvent)>;

/// The cart for one point-of-sale session.
///
/// The store owns its persistence: every mutation is written through the
/// key-value collaborator before listeners are notified. Writes are
/// fire-and-forget; a failed write is logged and the in-memory state remains
/// authoritative.
pub struct CartStore<S: KeyValueStore> {
    storage: S,
    items: SmallVec<[LineItem; 8]>,
    payments: Vec<PaymentRecord>,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a cart over the given storage, rehydrating any cart and payment
    /// history a previous session persisted.
    ///
    /// Missing or corrupt documents yield an empty cart or history; a corrupt
    /// document is logged and discarded.
    pub fn new(storage: S) -> Self {
        let items = load_document(&storage, CART_KEY);
        let payments = load_document(&storage, PAYMENTS_KEY);

        Self {
            storage,
            items,
            payments,
            listeners: Vec::new(),
        }
    }

    /// Register a listener invoked after every cart mutation.
    pub fn on_change(&mut self, listener: impl FnMut(&CartEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add one unit of the given product.
    ///
    /// If a line item for the product already exists its quantity is
    /// incremented, otherwise a new line with quantity 1 is appended.
    pub fn add_item(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id() == product.id()) {
            Some(item) => item.increment(),
            None => self.items.push(LineItem::for_product(product)),
        }

        self.persist_cart();
        self.emit(&CartEvent::ItemAdded {
            id: product.id().to_owned(),
        });
    }

    /// Remove the line item for the given product, if present.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);

        if self.items.len() == before {
            return;
        }

        self.persist_cart();
        self.emit(&CartEvent::ItemRemoved { id: id.to_owned() });
    }

    /// Set the quantity of the line item for the given product.
    ///
    /// A quantity of 0 removes the line entirely, matching
    /// [`remove_item`](Self::remove_item). Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return;
        };

        item.set_quantity(quantity);
        self.persist_cart();
        self.emit(&CartEvent::QuantityUpdated {
            id: id.to_owned(),
            quantity,
        });
    }

    /// Remove all line items.
    ///
    /// Called explicitly by the UI and by checkout acknowledgement; the
    /// payment history is unaffected.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist_cart();
        self.emit(&CartEvent::Cleared);
    }

    /// Current line items, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart holds no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of unit price times quantity over all line items.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities over all line items.
    pub fn count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity()))
            .sum()
    }

    /// Write a payment record snapshotting the current cart.
    ///
    /// Returns `None` without touching the history if the cart is empty. The
    /// cart itself is not cleared here; the checkout flow clears it when the
    /// completion is acknowledged.
    pub fn record_payment(&mut self, method: PaymentMethod) -> Option<&PaymentRecord> {
        if self.items.is_empty() {
            return None;
        }

        let record = PaymentRecord::new(method, self.total(), self.items.to_vec());
        let id = record.id();

        self.payments.insert(0, record);
        self.payments.truncate(PAYMENT_HISTORY_LIMIT);
        self.persist_payments();
        self.emit(&CartEvent::PaymentRecorded { id });

        self.payments.first()
    }

    /// Recent payment records, newest first, at most
    /// [`PAYMENT_HISTORY_LIMIT`] entries.
    pub fn recent_payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    /// The storage collaborator this cart persists through.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist_cart(&mut self) {
        persist_document(&mut self.storage, CART_KEY, &self.items);
    }

    fn persist_payments(&mut self) {
        persist_document(&mut self.storage, PAYMENTS_KEY, &self.payments);
    }

    fn emit(&mut self, event: &CartEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl<S: KeyValueStore + fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("items", &self.items)
            .field("payments", &self.payments)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn load_document<S, T>(storage: &S, key: &str) -> T
where
    S: KeyValueStore,
    T: DeserializeOwned + Default,
{
    match storage.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                warn!(key, %error, "discarding corrupt session document");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(error) => {
            warn!(key, %error, "failed to read session document");
            T::default()
        }
    }
}

fn persist_document<S, T>(storage: &mut S, key: &str, value: &T)
where
    S: KeyValueStore,
    T: Serialize,
{
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(error) = storage.set(key, &raw) {
                warn!(key, %error, "failed to persist session document");
            }
        }
        Err(error) => warn!(key, %error, "failed to serialize session document"),
    }
}
