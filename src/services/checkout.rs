//! Checkout orchestrator: converts a cart into orders, applies an optional
//! promo discount, debits the wallet and clears the cart.
//!
//! The flow is validate -> price -> balance check -> commit. All validation
//! and pricing happen before any mutation; the commit then runs its three
//! effects (order creation, wallet debit, cart clear) with nothing left that
//! can fail, so a rejected checkout never leaves partial state behind. The
//! whole attempt holds the per-user critical section.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    errors::ServiceError,
    services::{
        cart::CartService,
        promotions::PromotionService,
        wallet::{round_currency, WalletService},
    },
    store::Store,
};

/// Totals reported to the customer after a successful checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub remaining_balance: Decimal,
    pub order_count: usize,
}

#[derive(Clone)]
pub struct CheckoutService {
    store: Arc<Store>,
    cart: CartService,
    promotions: PromotionService,
    wallet: WalletService,
}

impl CheckoutService {
    pub fn new(
        store: Arc<Store>,
        cart: CartService,
        promotions: PromotionService,
        wallet: WalletService,
    ) -> Self {
        Self {
            store,
            cart,
            promotions,
            wallet,
        }
    }

    /// Run a checkout attempt for a user, optionally applying a promo code.
    ///
    /// An unknown or inactive promo code is not a hard failure: the checkout
    /// proceeds with no discount. `/promo-codes/validate` exists for callers
    /// that want to reject bad codes up front.
    #[instrument(skip(self))]
    pub async fn checkout(
        &self,
        user_id: &str,
        promo_code: Option<&str>,
    ) -> Result<CheckoutSummary, ServiceError> {
        let lock = self.store.user_lock(user_id);
        let _guard = lock.lock().await;

        // Validate
        let user = self
            .store
            .user(user_id)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", user_id)))?;

        if self.cart.items(user_id).is_empty() {
            return Err(ServiceError::InvalidOperation("Cart is empty".to_string()));
        }

        // Price
        let totals = self.cart.cart_with_totals(user_id);
        let subtotal = totals.subtotal;

        let discount = promo_code
            .and_then(|code| self.promotions.resolve(code))
            .map(|promo| PromotionService::discount_amount(&promo, subtotal))
            .unwrap_or(Decimal::ZERO);

        // One rounding pass at the end, not per line
        let discount = round_currency(discount);
        let total = round_currency(subtotal - discount);

        // Balance check: reject before any mutation
        if user.wallet_balance < total {
            return Err(ServiceError::InsufficientBalance {
                required: total,
                available: round_currency(user.wallet_balance),
            });
        }

        // Commit: freeze one order per line, debit, clear. The discount is
        // allocated across lines proportionally, with the last line taking
        // the remainder so the order ledger sums to exactly what was paid.
        // Each share is capped at whatever is still unallocated: rounded
        // shares can overshoot the total, and an uncapped overshoot would
        // push the final line's remainder below zero.
        let mut allocated = Decimal::ZERO;
        let line_count = totals.lines.len();
        for (i, line) in totals.lines.iter().enumerate() {
            let remaining = total - allocated;
            let share = if i + 1 == line_count {
                remaining
            } else if subtotal.is_zero() {
                Decimal::ZERO
            } else {
                round_currency(line.line_total * total / subtotal).min(remaining)
            };
            allocated += share;
            self.store
                .create_order(user_id, &line.item.product_id, line.item.quantity, share);
        }
        let remaining_balance = self.wallet.adjust_balance(user_id, -total)?;
        self.cart.clear(user_id);

        info!(
            "Checkout committed for {}: {} orders, subtotal {}, discount {}, total {}",
            user_id,
            totals.lines.len(),
            subtotal,
            discount,
            total
        );

        Ok(CheckoutSummary {
            subtotal,
            discount,
            total,
            remaining_balance,
            order_count: totals.lines.len(),
        })
    }
}
