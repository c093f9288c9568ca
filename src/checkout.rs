//! Checkout
//!
//! The checkout flow a point-of-sale UI drives: idle, selecting a payment
//! method, processing, complete. The flow writes the payment record through
//! the cart but never clears it on its own; the cart is cleared only when the
//! completed sale is acknowledged, after whatever confirmation delay the UI
//! applies.

use thiserror::Error;

use crate::{
    cart::CartStore,
    payments::{PaymentMethod, PaymentRecord},
    storage::KeyValueStore,
};

/// Where a checkout currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// No checkout in progress.
    #[default]
    Idle,
    /// Checkout requested; waiting for a payment method.
    SelectingPayment,
    /// A payment method was chosen and the payment is being taken.
    Processing(PaymentMethod),
    /// The payment record was written; waiting for acknowledgement.
    Complete(PaymentMethod),
}

impl CheckoutState {
    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SelectingPayment => "selecting-payment",
            Self::Processing(_) => "processing",
            Self::Complete(_) => "complete",
        }
    }
}

/// Errors raised by out-of-order checkout transitions.
///
/// These indicate a caller bug: a correctly wired UI never invokes a
/// transition from a state that does not offer it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The requested transition is not available from the current state.
    #[error("cannot {action} while checkout is {state}")]
    InvalidTransition {
        /// The transition that was attempted.
        action: &'static str,
        /// Name of the state the flow was in.
        state: &'static str,
    },
}

impl CheckoutError {
    fn invalid(action: &'static str, state: CheckoutState) -> Self {
        Self::InvalidTransition {
            action,
            state: state.name(),
        }
    }
}

/// One checkout in progress against a session's cart.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    /// Create a flow in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Request a checkout for the given cart.
    ///
    /// Requesting checkout on an empty cart is a no-op and the flow stays
    /// idle; the UI should not have offered the action, but the core stays
    /// defensive about it.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if a checkout is already in progress.
    pub fn begin<S: KeyValueStore>(&mut self, cart: &CartStore<S>) -> Result<(), CheckoutError> {
        if self.state != CheckoutState::Idle {
            return Err(CheckoutError::invalid("begin checkout", self.state));
        }

        if !cart.is_empty() {
            self.state = CheckoutState::SelectingPayment;
        }

        Ok(())
    }

    /// Choose the payment method for this checkout.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] unless a method is currently being
    /// selected.
    pub fn choose(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        if self.state != CheckoutState::SelectingPayment {
            return Err(CheckoutError::invalid("choose a payment method", self.state));
        }

        self.state = CheckoutState::Processing(method);
        Ok(())
    }

    /// Abandon the checkout during payment selection.
    ///
    /// Returns to idle without side effects.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] unless a method is currently being
    /// selected.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        if self.state != CheckoutState::SelectingPayment {
            return Err(CheckoutError::invalid("cancel checkout", self.state));
        }

        self.state = CheckoutState::Idle;
        Ok(())
    }

    /// Mark the payment as taken and write the payment record.
    ///
    /// The cart is left intact; call [`acknowledge`](Self::acknowledge) once
    /// the UI has shown the confirmation.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] unless a payment is being processed.
    pub fn complete<'a, S: KeyValueStore>(
        &mut self,
        cart: &'a mut CartStore<S>,
    ) -> Result<Option<&'a PaymentRecord>, CheckoutError> {
        let CheckoutState::Processing(method) = self.state else {
            return Err(CheckoutError::invalid("complete payment", self.state));
        };

        self.state = CheckoutState::Complete(method);
        Ok(cart.record_payment(method))
    }

    /// Acknowledge a completed checkout: clear the cart and return to idle.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] unless the checkout is complete.
    pub fn acknowledge<S: KeyValueStore>(
        &mut self,
        cart: &mut CartStore<S>,
    ) -> Result<(), CheckoutError> {
        let CheckoutState::Complete(_) = self.state else {
            return Err(CheckoutError::invalid("acknowledge checkout", self.state));
        };

        cart.clear();
        self.state = CheckoutState::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{products::Product, storage::MemoryStore};

    use super::*;

    fn cart_with_widget() -> CartStore<MemoryStore> {
        let mut cart = CartStore::new(MemoryStore::new());
        let widget = Product::new("p1", "Widget", dec!(10.00)).expect("test price is valid");
        cart.add_item(&widget);
        cart
    }

    #[test]
    fn begin_on_empty_cart_stays_idle() -> TestResult {
        let cart = CartStore::new(MemoryStore::new());
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart)?;

        assert_eq!(flow.state(), CheckoutState::Idle);

        Ok(())
    }

    #[test]
    fn happy_path_records_then_clears_on_acknowledge() -> TestResult {
        let mut cart = cart_with_widget();
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart)?;
        assert_eq!(flow.state(), CheckoutState::SelectingPayment);

        flow.choose(PaymentMethod::Cash)?;
        assert_eq!(flow.state(), CheckoutState::Processing(PaymentMethod::Cash));

        flow.complete(&mut cart)?;
        assert_eq!(flow.state(), CheckoutState::Complete(PaymentMethod::Cash));
        assert_eq!(cart.recent_payments().len(), 1);
        assert!(!cart.is_empty(), "completion must not clear the cart");

        flow.acknowledge(&mut cart)?;
        assert_eq!(flow.state(), CheckoutState::Idle);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.recent_payments().len(), 1, "history survives clearing");

        Ok(())
    }

    #[test]
    fn cancel_returns_to_idle_without_side_effects() -> TestResult {
        let mut cart = cart_with_widget();
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart)?;
        flow.cancel()?;

        assert_eq!(flow.state(), CheckoutState::Idle);
        assert_eq!(cart.count(), 1);
        assert!(cart.recent_payments().is_empty());

        Ok(())
    }

    #[test]
    fn choose_before_begin_is_rejected() {
        let mut flow = CheckoutFlow::new();

        let result = flow.choose(PaymentMethod::Cash);

        assert_eq!(
            result,
            Err(CheckoutError::InvalidTransition {
                action: "choose a payment method",
                state: "idle",
            })
        );
    }

    #[test]
    fn begin_twice_is_rejected() -> TestResult {
        let cart = cart_with_widget();
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart)?;
        let result = flow.begin(&cart);

        assert_eq!(
            result,
            Err(CheckoutError::InvalidTransition {
                action: "begin checkout",
                state: "selecting-payment",
            })
        );

        Ok(())
    }

    #[test]
    fn acknowledge_before_completion_is_rejected() -> TestResult {
        let mut cart = cart_with_widget();
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart)?;
        flow.choose(PaymentMethod::Debit)?;
        let result = flow.acknowledge(&mut cart);

        assert_eq!(
            result,
            Err(CheckoutError::InvalidTransition {
                action: "acknowledge checkout",
                state: "processing",
            })
        );
        assert_eq!(cart.count(), 1);

        Ok(())
    }
}
