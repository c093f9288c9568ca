//! Mostrador prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    access::AccessResolver,
    cart::{CartEvent, CartStore},
    checkout::{CheckoutError, CheckoutFlow, CheckoutState},
    items::LineItem,
    payments::{
        CheckoutContext, PAYMENT_HISTORY_LIMIT, PaymentMethod, PaymentRecord,
        UnknownPaymentMethod,
    },
    products::{Product, ProductError},
    roles::{BadgeColor, Permission, ROLES, Role, RoleCode},
    storage::{CART_KEY, KeyValueStore, MemoryStore, PAYMENTS_KEY, StorageError},
};
