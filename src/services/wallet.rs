//! Wallet ledger: the only code path that reads or writes a user's stored
//! balance, so rounding and formatting stay consistent everywhere.

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, instrument};

use crate::{errors::ServiceError, store::Store};

/// Round a currency amount half-up to two decimals and pin the scale to 2,
/// so serialized amounts always read like "24000.00".
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

#[derive(Clone)]
pub struct WalletService {
    store: Arc<Store>,
}

impl WalletService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Current balance for a user.
    pub fn balance(&self, user_id: &str) -> Result<Decimal, ServiceError> {
        self.store
            .user(user_id)
            .map(|u| u.wallet_balance)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))
    }

    /// Apply a signed delta (positive = credit, negative = debit) and persist
    /// the new 2-decimal balance.
    ///
    /// This is a low-level primitive without business-rule awareness: it will
    /// happily drive a balance negative. The checkout orchestrator performs
    /// the sufficiency check before calling it.
    #[instrument(skip(self))]
    pub fn adjust_balance(&self, user_id: &str, delta: Decimal) -> Result<Decimal, ServiceError> {
        let user = self
            .store
            .user(user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;

        let new_balance = round_currency(user.wallet_balance + delta);
        self.store
            .set_wallet_balance(user_id, new_balance)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;

        info!("Adjusted wallet for {}: {:+} -> {}", user_id, delta, new_balance);
        Ok(new_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn service_with_user(balance: Decimal) -> WalletService {
        let store = Arc::new(Store::new());
        store.create_user_with_id("u1", balance);
        WalletService::new(store)
    }

    #[test]
    fn round_currency_is_half_up() {
        assert_eq!(round_currency(dec!(1.005)), dec!(1.01));
        assert_eq!(round_currency(dec!(1.004)), dec!(1.00));
        assert_eq!(round_currency(dec!(6000)), dec!(6000.00));
        assert_eq!(round_currency(dec!(6000)).to_string(), "6000.00");
    }

    #[test]
    fn credit_and_debit_round_trip() {
        let wallet = service_with_user(dec!(100.00));

        let after_credit = wallet.adjust_balance("u1", dec!(49.995)).unwrap();
        assert_eq!(after_credit, dec!(150.00));

        let after_debit = wallet.adjust_balance("u1", dec!(-150.00)).unwrap();
        assert_eq!(after_debit, dec!(0.00));
    }

    #[test]
    fn unknown_user_is_not_found() {
        let wallet = service_with_user(dec!(0.00));
        assert!(matches!(
            wallet.adjust_balance("missing", dec!(1.00)),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn balance_is_normalized_to_two_decimals() {
        let wallet = service_with_user(dec!(10));
        let balance = wallet.adjust_balance("u1", dec!(0)).unwrap();
        assert_eq!(balance.to_string(), "10.00");
    }
}
