use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub name: String,
    pub price: Decimal,
    pub img: String,
    pub sku: i32,
    pub paypal: String,
}

/// A single product together with its size labels, ordered by `sizes.order`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub sizes: Vec<String>,
}

impl ProductDetail {
    pub fn new(product: Product, sizes: Vec<String>) -> Self {
        Self { product, sizes }
    }
}

/// 1-based inclusive catalog positions turned into an `OFFSET`/`LIMIT` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

impl Window {
    /// `start` below 1 is clamped to 1. Returns `None` when the range is empty.
    pub fn new(start: i64, end: i64) -> Option<Self> {
        let start = start.max(1);
        if end < start {
            return None;
        }
        Some(Self {
            offset: start - 1,
            limit: end - start + 1,
        })
    }
}
