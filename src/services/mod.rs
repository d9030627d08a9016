//! Business services layered over the entity store.

pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod gift_codes;
pub mod promotions;
pub mod wallet;

use std::sync::Arc;

use crate::store::Store;

/// Aggregated service handles shared by all HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub cart: cart::CartService,
    pub promotions: promotions::PromotionService,
    pub wallet: wallet::WalletService,
    pub gift_codes: gift_codes::GiftCodeService,
    pub checkout: checkout::CheckoutService,
    pub analytics: analytics::AnalyticsService,
}

impl AppServices {
    pub fn new(store: Arc<Store>) -> Self {
        let cart = cart::CartService::new(store.clone());
        let promotions = promotions::PromotionService::new(store.clone());
        let wallet = wallet::WalletService::new(store.clone());
        let gift_codes = gift_codes::GiftCodeService::new(store.clone(), wallet.clone());
        let checkout = checkout::CheckoutService::new(
            store.clone(),
            cart.clone(),
            promotions.clone(),
            wallet.clone(),
        );
        let analytics = analytics::AnalyticsService::new(store);

        Self {
            cart,
            promotions,
            wallet,
            gift_codes,
            checkout,
            analytics,
        }
    }
}
