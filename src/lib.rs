//! Mostrador
//!
//! Mostrador is the cart and access-control core of a point-of-sale
//! storefront: the session shopping cart with derived totals, payment
//! history and checkout sequencing, and the role table with identifier
//! resolution and authorization checks. Rendering, routing and HTTP are the
//! caller's business; the core is driven through plain method calls and
//! reports back through return values and change events.

pub mod access;
pub mod cart;
pub mod checkout;
pub mod items;
pub mod payments;
pub mod prelude;
pub mod products;
pub mod roles;
pub mod storage;
