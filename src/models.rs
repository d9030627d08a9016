//! Domain records held by the in-memory [`Store`](crate::store::Store).
//!
//! All identifiers are opaque unique strings assigned at creation. Currency
//! fields use [`rust_decimal::Decimal`], which serializes as an exact decimal
//! string, never a binary float.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product. Immutable after seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub specifications: Vec<String>,
    /// 0/1 flag controlling placement on the storefront home page
    pub featured: i32,
}

/// One (product, quantity) line in a user's cart.
///
/// The store guarantees at most one line per (user, product) pair; adding an
/// already-carted product increments the existing line instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: i32,
}

/// Storefront customer. The wallet balance is only ever read or written
/// through the wallet ledger so rounding stays consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub wallet_balance: Decimal,
}

/// Percentage-off discount code, non-stacking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: String,
    /// Stored uppercased; matched case-insensitively
    pub code: String,
    /// Whole-percent discount, 1-100
    pub discount: i32,
    pub active: bool,
}

/// Single-use fixed-amount wallet credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftCode {
    pub id: String,
    pub code: String,
    pub amount: Decimal,
    pub active: bool,
}

/// Audit record of a gift code redemption, written atomically with the
/// wallet credit and the code deactivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftCodeRedemption {
    pub id: String,
    pub user_id: String,
    pub gift_code_id: String,
    pub created_at: DateTime<Utc>,
}

/// Placed order line. Created only by checkout, immutable afterward.
/// `total_price` is frozen at the price in effect at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Customer product review. Hidden reviews stay out of public listings but
/// remain visible to moderators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub rating: i32,
    pub comment: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub visible: bool,
}

/// Back-office administrator. Only a SHA-256 digest of the password is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Message submitted through the storefront contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
}
