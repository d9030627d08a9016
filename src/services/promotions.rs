//! Promotion resolver: maps a promo code string to its discount terms.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::{errors::ServiceError, models::PromoCode, store::Store};

#[derive(Clone)]
pub struct PromotionService {
    store: Arc<Store>,
}

impl PromotionService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Find an active promotion by code, case-insensitively.
    ///
    /// Inactive and unknown codes both come back as `None`; callers cannot
    /// tell "never existed" from "deactivated", which keeps the endpoint from
    /// leaking code enumeration information.
    pub fn resolve(&self, code: &str) -> Option<PromoCode> {
        let promo = self.store.active_promo_code(code);
        if promo.is_none() {
            debug!("No active promo code matching {:?}", code);
        }
        promo
    }

    /// Like [`resolve`](Self::resolve) but surfaced as a NotFound error for
    /// the validation endpoint.
    pub fn resolve_required(&self, code: &str) -> Result<PromoCode, ServiceError> {
        self.resolve(code)
            .ok_or_else(|| ServiceError::NotFound("Invalid promo code".to_string()))
    }

    /// Unrounded percentage discount over a subtotal. The checkout
    /// orchestrator applies the single end-of-pipeline rounding pass.
    pub fn discount_amount(promo: &PromoCode, subtotal: Decimal) -> Decimal {
        subtotal * Decimal::from(promo.discount) / Decimal::from(100)
    }
}
