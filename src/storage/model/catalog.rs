//! Product catalog records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stocked product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    /// Business identifier, human-entered.
    pub sku: String,
    pub name: String,
    pub category: String,
    /// Selling price in cents.
    pub price_cents: i64,
    /// Purchase cost in cents.
    pub cost_cents: i64,
    pub stock: i64,
    /// Stock level at which the product counts as low.
    pub reorder_level: i64,
    pub supplier_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.reorder_level
    }
}

/// Caller-supplied payload for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub stock: i64,
    pub reorder_level: i64,
    pub supplier_id: Option<u64>,
}

impl ProductDraft {
    pub fn into_product(self, id: u64, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            sku: self.sku,
            name: self.name,
            category: self.category,
            price_cents: self.price_cents,
            cost_cents: self.cost_cents,
            stock: self.stock,
            reorder_level: self.reorder_level,
            supplier_id: self.supplier_id,
            created_at,
        }
    }

    pub fn apply_to(self, product: &mut Product) {
        product.sku = self.sku;
        product.name = self.name;
        product.category = self.category;
        product.price_cents = self.price_cents;
        product.cost_cents = self.cost_cents;
        product.stock = self.stock;
        product.reorder_level = self.reorder_level;
        product.supplier_id = self.supplier_id;
    }
}
