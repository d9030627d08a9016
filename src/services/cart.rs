//! Cart service: line management plus the aggregator that joins cart lines
//! to catalog products and computes totals.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    errors::ServiceError,
    models::{CartItem, Product},
    services::wallet::round_currency,
    store::Store,
};

/// One cart line joined to its product, with the line total priced at the
/// current catalog price.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
    pub line_total: Decimal,
}

/// Aggregated cart view: joined lines plus their subtotal.
#[derive(Debug, Clone, Serialize)]
pub struct CartWithTotals {
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
}

#[derive(Clone)]
pub struct CartService {
    store: Arc<Store>,
}

impl CartService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Add a product to a user's cart.
    ///
    /// If a line for this (user, product) pair already exists its quantity is
    /// incremented; a duplicate line is never created.
    #[instrument(skip(self))]
    pub fn add_item(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<CartItem, ServiceError> {
        if quantity < 1 {
            return Err(ServiceError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        if let Some(existing) = self.store.cart_item_for_product(user_id, product_id) {
            let updated = self
                .store
                .set_cart_item_quantity(&existing.id, existing.quantity + quantity)
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Cart item {} not found", existing.id))
                })?;
            info!(
                "Incremented cart line {} for user {} to x{}",
                updated.id, user_id, updated.quantity
            );
            return Ok(updated);
        }

        let item = self.store.create_cart_item(user_id, product_id, quantity);
        info!(
            "Added cart line {} for user {}: product {} x{}",
            item.id, user_id, product_id, quantity
        );
        Ok(item)
    }

    /// Replace a line's quantity.
    pub fn update_quantity(&self, item_id: &str, quantity: i32) -> Result<CartItem, ServiceError> {
        if quantity < 1 {
            return Err(ServiceError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }
        self.store
            .set_cart_item_quantity(item_id, quantity)
            .ok_or_else(|| ServiceError::NotFound(format!("Cart item {} not found", item_id)))
    }

    /// Remove a single line.
    pub fn remove_item(&self, item_id: &str) -> Result<(), ServiceError> {
        if self.store.remove_cart_item(item_id) {
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!(
                "Cart item {} not found",
                item_id
            )))
        }
    }

    /// Delete every line belonging to a user.
    pub fn clear(&self, user_id: &str) {
        self.store.clear_cart(user_id);
    }

    /// Raw (unjoined) cart lines for a user.
    pub fn items(&self, user_id: &str) -> Vec<CartItem> {
        self.store.cart_items_for_user(user_id)
    }

    /// Join cart lines to products and compute totals.
    ///
    /// A line whose product no longer exists is treated as orphaned and
    /// silently dropped from the result, not reported as an error. Line
    /// totals and the subtotal are normalized to two decimals; the values are
    /// exact so this never changes an amount.
    pub fn cart_with_totals(&self, user_id: &str) -> CartWithTotals {
        let mut lines = Vec::new();
        let mut subtotal = Decimal::ZERO;

        for item in self.store.cart_items_for_user(user_id) {
            let Some(product) = self.store.product(&item.product_id) else {
                continue;
            };
            let line_total = round_currency(product.price * Decimal::from(item.quantity));
            subtotal += line_total;
            lines.push(CartLine {
                item,
                product,
                line_total,
            });
        }

        CartWithTotals {
            lines,
            subtotal: round_currency(subtotal),
        }
    }
}
