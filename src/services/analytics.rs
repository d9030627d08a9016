//! Sales analytics readers for the admin dashboard.
//!
//! Every view is derived on demand by scanning the order/product collections;
//! nothing is precomputed or cached.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{services::wallet::round_currency, store::Store};

/// Headline sales figures.
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub total_sales: Decimal,
    pub total_orders: u64,
    pub average_order_value: Decimal,
    pub total_products: u64,
}

/// Sales and order count for one UTC day.
#[derive(Debug, Clone, Serialize)]
pub struct SalesTrendPoint {
    pub date: NaiveDate,
    pub sales: Decimal,
    pub orders: u64,
}

/// Revenue leader entry, joined to catalog metadata when available.
#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub quantity: i64,
    pub revenue: Decimal,
}

/// Revenue grouped by product category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: Decimal,
}

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<Store>,
}

impl AnalyticsService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn summary(&self) -> SalesSummary {
        let orders = self.store.all_orders();
        let total_orders = orders.len() as u64;
        let total_sales: Decimal = orders.iter().map(|o| o.total_price).sum();
        let average_order_value = if total_orders > 0 {
            round_currency(total_sales / Decimal::from(total_orders))
        } else {
            round_currency(Decimal::ZERO)
        };

        SalesSummary {
            total_sales: round_currency(total_sales),
            total_orders,
            average_order_value,
            total_products: self.store.all_products().len() as u64,
        }
    }

    /// Per-day sales totals, date-ascending.
    pub fn sales_trend(&self) -> Vec<SalesTrendPoint> {
        let mut by_date: HashMap<NaiveDate, (Decimal, u64)> = HashMap::new();
        for order in self.store.all_orders() {
            let entry = by_date
                .entry(order.created_at.date_naive())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += order.total_price;
            entry.1 += 1;
        }

        let mut trend: Vec<SalesTrendPoint> = by_date
            .into_iter()
            .map(|(date, (sales, orders))| SalesTrendPoint {
                date,
                sales: round_currency(sales),
                orders,
            })
            .collect();
        trend.sort_by_key(|point| point.date);
        trend
    }

    /// Top ten products by revenue. Orders referencing products no longer in
    /// the catalog are kept and labeled as unknown.
    pub fn top_products(&self) -> Vec<TopProduct> {
        let mut by_product: HashMap<String, (i64, Decimal)> = HashMap::new();
        for order in self.store.all_orders() {
            let entry = by_product
                .entry(order.product_id.clone())
                .or_insert((0, Decimal::ZERO));
            entry.0 += i64::from(order.quantity);
            entry.1 += order.total_price;
        }

        let mut ranked: Vec<TopProduct> = by_product
            .into_iter()
            .map(|(product_id, (quantity, revenue))| {
                let product = self.store.product(&product_id);
                TopProduct {
                    product_name: product
                        .as_ref()
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    category: product
                        .map(|p| p.category)
                        .unwrap_or_else(|| "Unknown".to_string()),
                    product_id,
                    quantity,
                    revenue: round_currency(revenue),
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        ranked.truncate(10);
        ranked
    }

    /// Revenue per category. Orders whose product is gone are skipped, since
    /// the category is unknowable.
    pub fn category_revenue(&self) -> Vec<CategoryRevenue> {
        let mut by_category: HashMap<String, Decimal> = HashMap::new();
        for order in self.store.all_orders() {
            let Some(product) = self.store.product(&order.product_id) else {
                continue;
            };
            *by_category.entry(product.category).or_insert(Decimal::ZERO) += order.total_price;
        }

        let mut result: Vec<CategoryRevenue> = by_category
            .into_iter()
            .map(|(category, revenue)| CategoryRevenue {
                category,
                revenue: round_currency(revenue),
            })
            .collect();
        result.sort_by(|a, b| a.category.cmp(&b.category));
        result
    }
}
