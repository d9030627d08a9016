//! Gift code management and single-use redemption.

use std::sync::Arc;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    errors::ServiceError,
    models::GiftCode,
    services::wallet::{round_currency, WalletService},
    store::Store,
};

/// Outcome of a successful redemption.
#[derive(Debug, Clone, Serialize)]
pub struct RedemptionReceipt {
    pub amount_added: Decimal,
    pub new_balance: Decimal,
}

#[derive(Clone)]
pub struct GiftCodeService {
    store: Arc<Store>,
    wallet: WalletService,
}

impl GiftCodeService {
    pub fn new(store: Arc<Store>, wallet: WalletService) -> Self {
        Self { store, wallet }
    }

    /// Create a gift code with a caller-supplied code string.
    pub fn create(&self, code: &str, amount: Decimal) -> Result<GiftCode, ServiceError> {
        if amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Gift code amount must be positive".to_string(),
            ));
        }
        if self.store.gift_code_by_code(code).is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Gift code {} already exists",
                code
            )));
        }
        Ok(self.store.create_gift_code(code, round_currency(amount)))
    }

    /// Generate a gift code with a server-side code: a random alphanumeric
    /// part plus a time-based suffix to keep collisions out of reach.
    pub fn generate(&self, amount: Decimal) -> Result<GiftCode, ServiceError> {
        if amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Gift code amount must be positive".to_string(),
            ));
        }

        loop {
            let code = generate_code();
            if self.store.gift_code_by_code(&code).is_none() {
                return Ok(self.store.create_gift_code(&code, round_currency(amount)));
            }
            warn!("Gift code collision on {}, regenerating", code);
        }
    }

    /// Redeem a gift code into a user's wallet.
    ///
    /// The wallet credit, the code deactivation and the audit record are one
    /// logical unit, executed under the per-code critical section so two
    /// concurrent requests for the same code cannot both spend it.
    #[instrument(skip(self))]
    pub async fn redeem(
        &self,
        code: &str,
        user_id: &str,
    ) -> Result<RedemptionReceipt, ServiceError> {
        let gift = self
            .store
            .gift_code_by_code(code)
            .ok_or_else(|| ServiceError::NotFound("Invalid or expired gift code".to_string()))?;

        let code_lock = self.store.gift_code_lock(&gift.id);
        let _code_guard = code_lock.lock().await;

        // Re-read under the lock; a concurrent redemption may have won.
        let gift = self
            .store
            .gift_code_by_code(code)
            .ok_or_else(|| ServiceError::NotFound("Invalid or expired gift code".to_string()))?;
        if !gift.active {
            return Err(ServiceError::InvalidOperation(
                "Gift code has already been used".to_string(),
            ));
        }

        if self.store.user(user_id).is_none() {
            return Err(ServiceError::NotFound(format!(
                "User {} not found",
                user_id
            )));
        }

        let user_lock = self.store.user_lock(user_id);
        let _user_guard = user_lock.lock().await;

        let new_balance = self.wallet.adjust_balance(user_id, gift.amount)?;
        self.store.update_gift_code(&gift.id, None, Some(false));
        self.store.create_redemption(user_id, &gift.id);

        info!(
            "Gift code {} redeemed by {} for {}",
            gift.code, user_id, gift.amount
        );

        Ok(RedemptionReceipt {
            amount_added: round_currency(gift.amount),
            new_balance,
        })
    }
}

fn generate_code() -> String {
    let random_part: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    format!("GFT{}{:X}", random_part, Utc::now().timestamp_millis())
}
