//! Process-wide entity store.
//!
//! Owns all mutable state: one keyed collection per entity kind, plus the
//! lock registries that give multi-step flows (checkout, gift-code
//! redemption) a critical section per user and per gift code. The store is
//! always constructed explicitly and injected through [`crate::AppState`],
//! so tests can spin up isolated instances.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    Admin, CartItem, ContactMessage, GiftCode, GiftCodeRedemption, Order, Product, PromoCode,
    Review, User,
};

/// Id of the demo storefront user created at seed time.
pub const GUEST_USER_ID: &str = "guest-user";

#[derive(Debug, Default)]
pub struct Store {
    products: DashMap<String, Product>,
    cart_items: DashMap<String, CartItem>,
    users: DashMap<String, User>,
    promo_codes: DashMap<String, PromoCode>,
    gift_codes: DashMap<String, GiftCode>,
    redemptions: DashMap<String, GiftCodeRedemption>,
    orders: DashMap<String, Order>,
    reviews: DashMap<String, Review>,
    admins: DashMap<String, Admin>,
    contact_messages: DashMap<String, ContactMessage>,

    user_locks: DashMap<String, Arc<Mutex<()>>>,
    gift_code_locks: DashMap<String, Arc<Mutex<()>>>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Store {
    /// Empty store, no seed data. Used by tests that build their own fixtures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the catalog, the sample promo codes, the seeded
    /// administrator and a demo user with a funded wallet.
    pub fn seeded(admin_email: &str, admin_password_hash: &str) -> Self {
        let store = Self::new();
        store.seed_products();
        store.seed_promo_codes();
        store.create_admin(admin_email, admin_password_hash);
        store.create_user_with_id(GUEST_USER_ID, dec!(50000.00));
        store
    }

    // ---- locks ------------------------------------------------------------

    /// Critical-section handle for all mutating flows touching one user's
    /// cart, wallet and orders.
    pub fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Critical-section handle for redemption of a single gift code,
    /// preventing concurrent double-spend of the same code.
    pub fn gift_code_lock(&self, gift_code_id: &str) -> Arc<Mutex<()>> {
        self.gift_code_locks
            .entry(gift_code_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // ---- products ---------------------------------------------------------

    pub fn all_products(&self) -> Vec<Product> {
        self.products.iter().map(|p| p.value().clone()).collect()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.products.get(id).map(|p| p.value().clone())
    }

    pub fn create_product(
        &self,
        name: &str,
        category: &str,
        price: Decimal,
        description: &str,
        image: &str,
        specifications: Vec<String>,
        featured: i32,
    ) -> Product {
        let product = Product {
            id: new_id(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            description: description.to_string(),
            image: image.to_string(),
            specifications,
            featured,
        };
        self.products.insert(product.id.clone(), product.clone());
        product
    }

    // ---- cart items -------------------------------------------------------

    pub fn cart_items_for_user(&self, user_id: &str) -> Vec<CartItem> {
        self.cart_items
            .iter()
            .filter(|item| item.value().user_id == user_id)
            .map(|item| item.value().clone())
            .collect()
    }

    pub fn cart_item(&self, id: &str) -> Option<CartItem> {
        self.cart_items.get(id).map(|i| i.value().clone())
    }

    /// Existing line for a (user, product) pair, if any. At most one exists.
    pub fn cart_item_for_product(&self, user_id: &str, product_id: &str) -> Option<CartItem> {
        self.cart_items
            .iter()
            .find(|item| item.value().user_id == user_id && item.value().product_id == product_id)
            .map(|item| item.value().clone())
    }

    pub fn create_cart_item(&self, user_id: &str, product_id: &str, quantity: i32) -> CartItem {
        let item = CartItem {
            id: new_id(),
            user_id: user_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
        };
        self.cart_items.insert(item.id.clone(), item.clone());
        item
    }

    pub fn set_cart_item_quantity(&self, id: &str, quantity: i32) -> Option<CartItem> {
        let mut entry = self.cart_items.get_mut(id)?;
        entry.quantity = quantity;
        Some(entry.clone())
    }

    pub fn remove_cart_item(&self, id: &str) -> bool {
        self.cart_items.remove(id).is_some()
    }

    pub fn clear_cart(&self, user_id: &str) {
        self.cart_items.retain(|_, item| item.user_id != user_id);
    }

    // ---- users ------------------------------------------------------------

    pub fn user(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|u| u.value().clone())
    }

    pub fn create_user_with_id(&self, id: &str, wallet_balance: Decimal) -> User {
        let user = User {
            id: id.to_string(),
            wallet_balance,
        };
        self.users.insert(user.id.clone(), user.clone());
        user
    }

    /// Raw balance write. Only the wallet ledger may call this; every other
    /// component goes through `WalletService::adjust_balance`.
    pub(crate) fn set_wallet_balance(&self, id: &str, balance: Decimal) -> Option<User> {
        let mut entry = self.users.get_mut(id)?;
        entry.wallet_balance = balance;
        Some(entry.clone())
    }

    // ---- promo codes ------------------------------------------------------

    pub fn all_promo_codes(&self) -> Vec<PromoCode> {
        self.promo_codes.iter().map(|p| p.value().clone()).collect()
    }

    /// Case-insensitive lookup over active codes only. Inactive and unknown
    /// codes are indistinguishable to the caller.
    pub fn active_promo_code(&self, code: &str) -> Option<PromoCode> {
        self.promo_codes
            .iter()
            .find(|p| p.value().active && p.value().code.eq_ignore_ascii_case(code))
            .map(|p| p.value().clone())
    }

    /// Case-insensitive lookup regardless of the active flag; the uniqueness
    /// check at creation must also see deactivated codes.
    pub fn promo_code_by_code(&self, code: &str) -> Option<PromoCode> {
        self.promo_codes
            .iter()
            .find(|p| p.value().code.eq_ignore_ascii_case(code))
            .map(|p| p.value().clone())
    }

    pub fn create_promo_code(&self, code: &str, discount: i32) -> PromoCode {
        let promo = PromoCode {
            id: new_id(),
            code: code.to_uppercase(),
            discount,
            active: true,
        };
        self.promo_codes.insert(promo.id.clone(), promo.clone());
        promo
    }

    pub fn update_promo_code(
        &self,
        id: &str,
        discount: Option<i32>,
        active: Option<bool>,
    ) -> Option<PromoCode> {
        let mut entry = self.promo_codes.get_mut(id)?;
        if let Some(discount) = discount {
            entry.discount = discount;
        }
        if let Some(active) = active {
            entry.active = active;
        }
        Some(entry.clone())
    }

    pub fn delete_promo_code(&self, id: &str) -> bool {
        self.promo_codes.remove(id).is_some()
    }

    // ---- gift codes -------------------------------------------------------

    pub fn all_gift_codes(&self) -> Vec<GiftCode> {
        self.gift_codes.iter().map(|g| g.value().clone()).collect()
    }

    /// Exact-match lookup regardless of the active flag; redemption needs to
    /// distinguish "unknown" from "already used".
    pub fn gift_code_by_code(&self, code: &str) -> Option<GiftCode> {
        self.gift_codes
            .iter()
            .find(|g| g.value().code == code)
            .map(|g| g.value().clone())
    }

    pub fn create_gift_code(&self, code: &str, amount: Decimal) -> GiftCode {
        let gift = GiftCode {
            id: new_id(),
            code: code.to_string(),
            amount,
            active: true,
        };
        self.gift_codes.insert(gift.id.clone(), gift.clone());
        gift
    }

    pub fn update_gift_code(
        &self,
        id: &str,
        amount: Option<Decimal>,
        active: Option<bool>,
    ) -> Option<GiftCode> {
        let mut entry = self.gift_codes.get_mut(id)?;
        if let Some(amount) = amount {
            entry.amount = amount;
        }
        if let Some(active) = active {
            entry.active = active;
        }
        Some(entry.clone())
    }

    pub fn delete_gift_code(&self, id: &str) -> bool {
        self.gift_codes.remove(id).is_some()
    }

    pub fn redemptions_for_user(&self, user_id: &str) -> Vec<GiftCodeRedemption> {
        self.redemptions
            .iter()
            .filter(|r| r.value().user_id == user_id)
            .map(|r| r.value().clone())
            .collect()
    }

    pub fn create_redemption(&self, user_id: &str, gift_code_id: &str) -> GiftCodeRedemption {
        let redemption = GiftCodeRedemption {
            id: new_id(),
            user_id: user_id.to_string(),
            gift_code_id: gift_code_id.to_string(),
            created_at: Utc::now(),
        };
        self.redemptions
            .insert(redemption.id.clone(), redemption.clone());
        redemption
    }

    // ---- orders -----------------------------------------------------------

    pub fn all_orders(&self) -> Vec<Order> {
        self.orders.iter().map(|o| o.value().clone()).collect()
    }

    pub fn create_order(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i32,
        total_price: Decimal,
    ) -> Order {
        let order = Order {
            id: new_id(),
            user_id: user_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
            total_price,
            created_at: Utc::now(),
        };
        self.orders.insert(order.id.clone(), order.clone());
        order
    }

    // ---- reviews ----------------------------------------------------------

    pub fn all_reviews(&self) -> Vec<Review> {
        self.reviews.iter().map(|r| r.value().clone()).collect()
    }

    /// Publicly visible reviews for one product, newest first.
    pub fn visible_reviews_for_product(&self, product_id: &str) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.value().product_id == product_id && r.value().visible)
            .map(|r| r.value().clone())
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    pub fn create_review(
        &self,
        product_id: &str,
        rating: i32,
        comment: &str,
        author_name: &str,
    ) -> Review {
        let review = Review {
            id: new_id(),
            product_id: product_id.to_string(),
            rating,
            comment: comment.to_string(),
            author_name: author_name.to_string(),
            created_at: Utc::now(),
            visible: true,
        };
        self.reviews.insert(review.id.clone(), review.clone());
        review
    }

    pub fn update_review(&self, id: &str, visible: Option<bool>) -> Option<Review> {
        let mut entry = self.reviews.get_mut(id)?;
        if let Some(visible) = visible {
            entry.visible = visible;
        }
        Some(entry.clone())
    }

    pub fn delete_review(&self, id: &str) -> bool {
        self.reviews.remove(id).is_some()
    }

    // ---- admins -----------------------------------------------------------

    pub fn admin_by_email(&self, email: &str) -> Option<Admin> {
        self.admins
            .iter()
            .find(|a| a.value().email == email)
            .map(|a| a.value().clone())
    }

    pub fn admin(&self, id: &str) -> Option<Admin> {
        self.admins.get(id).map(|a| a.value().clone())
    }

    pub fn all_admins(&self) -> Vec<Admin> {
        self.admins.iter().map(|a| a.value().clone()).collect()
    }

    pub fn create_admin(&self, email: &str, password_hash: &str) -> Admin {
        let admin = Admin {
            id: new_id(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        self.admins.insert(admin.id.clone(), admin.clone());
        admin
    }

    // ---- contact messages -------------------------------------------------

    pub fn create_contact_message(&self, name: &str, email: &str, message: &str) -> ContactMessage {
        let msg = ContactMessage {
            id: new_id(),
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        };
        self.contact_messages.insert(msg.id.clone(), msg.clone());
        msg
    }

    // ---- seed data --------------------------------------------------------

    fn seed_promo_codes(&self) {
        self.create_promo_code("WELCOME10", 10);
        self.create_promo_code("SAVE20", 20);
        self.create_promo_code("MEGA50", 50);
    }

    fn seed_products(&self) {
        self.create_product(
            "French Door Refrigerator 28 cu. ft.",
            "Refrigerator",
            dec!(100000.00),
            "Experience the perfect blend of style and innovation with our French door \
             refrigerator. Features FlexZone drawer, Twin Cooling Plus technology, and smart \
             connectivity for ultimate food preservation.",
            "/images/refrigerator.png",
            vec![
                "Capacity: 28 cubic feet".to_string(),
                "FlexZone Drawer with adjustable temperature".to_string(),
                "Twin Cooling Plus technology".to_string(),
                "Wi-Fi enabled with SmartThings integration".to_string(),
                "Ice and water dispenser".to_string(),
                "Energy Star certified".to_string(),
            ],
            1,
        );
        self.create_product(
            "65-inch 4K QLED Smart TV",
            "TV",
            dec!(50000.00),
            "Immerse yourself in stunning picture quality with Quantum Dot technology. This \
             premium 4K QLED TV delivers over a billion shades of brilliant color and \
             exceptional brightness for a truly cinematic experience.",
            "/images/television.png",
            vec![
                "Screen Size: 65 inches".to_string(),
                "Resolution: 4K Ultra HD (3840 x 2160)".to_string(),
                "Quantum Dot technology".to_string(),
                "HDR10+ support".to_string(),
                "120Hz refresh rate".to_string(),
                "Smart TV with voice control".to_string(),
            ],
            1,
        );
        self.create_product(
            "Smartwatch Pro",
            "Smartwatch",
            dec!(29999.00),
            "Stay connected and track your health with our advanced smartwatch. Features \
             comprehensive health monitoring, long battery life, and seamless integration \
             with your smartphone.",
            "/images/smartwatch.png",
            vec![
                "1.4-inch Super AMOLED display".to_string(),
                "Advanced health monitoring (heart rate, ECG, sleep)".to_string(),
                "5ATM water resistance".to_string(),
                "Up to 3 days battery life".to_string(),
                "GPS and NFC".to_string(),
                "Compatible with Android and iOS".to_string(),
            ],
            1,
        );
        self.create_product(
            "Ultra Smartphone",
            "Smartphone",
            dec!(80000.00),
            "The ultimate flagship smartphone with cutting-edge AI features, \
             professional-grade cameras, and unmatched performance. Experience the future \
             of mobile technology.",
            "/images/smartphone.png",
            vec![
                "6.8-inch Dynamic AMOLED display".to_string(),
                "200MP main camera with AI enhancement".to_string(),
                "Snapdragon 8 Gen 3 processor".to_string(),
                "12GB RAM, 256GB storage".to_string(),
                "5000mAh battery with fast charging".to_string(),
                "S Pen included".to_string(),
            ],
            1,
        );
        self.create_product(
            "Pro Buds Wireless Earbuds",
            "Earbuds",
            dec!(4999.00),
            "Premium wireless earbuds with intelligent active noise cancellation, immersive \
             sound, and all-day comfort. Perfect for music, calls, and everything in between.",
            "/images/earbuds.png",
            vec![
                "Active Noise Cancellation".to_string(),
                "360 Audio with Dolby Atmos".to_string(),
                "Up to 8 hours playback (28 hours with case)".to_string(),
                "IPX7 water resistance".to_string(),
                "Wireless charging case".to_string(),
                "Touch controls".to_string(),
            ],
            1,
        );
        self.create_product(
            "Ultra Laptop",
            "Laptop",
            dec!(80000.00),
            "Power through demanding tasks with our ultra-premium laptop. Features the \
             latest Intel processor, stunning AMOLED display, and all-day battery life in a \
             sleek, portable design.",
            "/images/laptop.png",
            vec![
                "16-inch 3K AMOLED touchscreen".to_string(),
                "Intel Core Ultra 9 processor".to_string(),
                "32GB RAM, 1TB SSD".to_string(),
                "NVIDIA GeForce RTX 4070".to_string(),
                "Up to 16 hours battery life".to_string(),
                "Thunderbolt 4 ports".to_string(),
            ],
            1,
        );
        self.create_product(
            "25,000mAh Fast Charge Power Bank",
            "Power Bank",
            dec!(1999.00),
            "Never run out of power with our high-capacity portable charger. Features super \
             fast charging, multiple ports, and a premium aluminum design.",
            "/images/power-bank.png",
            vec![
                "Capacity: 25,000mAh".to_string(),
                "45W Super Fast Charging".to_string(),
                "3 USB ports (2x USB-C, 1x USB-A)".to_string(),
                "LED charge indicator".to_string(),
                "Compact aluminum body".to_string(),
                "Pass-through charging".to_string(),
            ],
            0,
        );
        self.create_product(
            "Smart Front Load Washer 5.0 cu. ft.",
            "Washing Machine",
            dec!(46990.00),
            "Revolutionize laundry day with our smart front-load washer. Advanced cleaning \
             technology meets energy efficiency for impeccably clean clothes every time.",
            "/images/washer.png",
            vec![
                "Capacity: 5.0 cubic feet".to_string(),
                "Smart Control with Wi-Fi".to_string(),
                "Steam cleaning technology".to_string(),
                "14 wash cycles".to_string(),
                "Energy Star certified".to_string(),
                "Self-cleaning drum".to_string(),
            ],
            0,
        );
        self.create_product(
            "WindFree Elite Air Conditioner",
            "AC",
            dec!(20000.00),
            "Experience comfortable cooling without the cold draft. Our WindFree technology \
             distributes air gently through thousands of micro holes for a gentle, still air \
             cooling experience.",
            "/images/air-conditioner.png",
            vec![
                "18,000 BTU cooling capacity".to_string(),
                "WindFree cooling technology".to_string(),
                "Smart inverter compressor".to_string(),
                "Wi-Fi enabled with app control".to_string(),
                "Triple protection filter".to_string(),
                "Energy efficiency rating: A+++".to_string(),
            ],
            0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_has_catalog_and_codes() {
        let store = Store::seeded("admin@example.com", "digest");
        assert_eq!(store.all_products().len(), 9);
        assert_eq!(store.all_promo_codes().len(), 3);
        assert!(store.user(GUEST_USER_ID).is_some());
        assert!(store.admin_by_email("admin@example.com").is_some());
    }

    #[test]
    fn promo_lookup_is_case_insensitive_and_active_only() {
        let store = Store::new();
        let promo = store.create_promo_code("save20", 20);
        assert_eq!(promo.code, "SAVE20");

        assert!(store.active_promo_code("sAvE20").is_some());

        store.update_promo_code(&promo.id, None, Some(false));
        assert!(store.active_promo_code("SAVE20").is_none());
    }

    #[test]
    fn clear_cart_only_touches_one_user() {
        let store = Store::new();
        store.create_cart_item("alice", "p1", 1);
        store.create_cart_item("alice", "p2", 2);
        store.create_cart_item("bob", "p1", 1);

        store.clear_cart("alice");

        assert!(store.cart_items_for_user("alice").is_empty());
        assert_eq!(store.cart_items_for_user("bob").len(), 1);
    }

    #[test]
    fn user_lock_is_shared_per_user() {
        let store = Store::new();
        let a = store.user_lock("alice");
        let b = store.user_lock("alice");
        assert!(Arc::ptr_eq(&a, &b));
        let c = store.user_lock("bob");
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
