pub mod admin;
pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod common;
pub mod contact;
pub mod gift_codes;
pub mod orders;
pub mod products;
pub mod promo_codes;
pub mod reviews;
pub mod users;
