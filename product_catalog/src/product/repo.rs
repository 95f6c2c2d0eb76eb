use sqlx::Postgres;
use tracing::debug;

use super::model::{Product, ProductDetail, Window};
use crate::error::Result;

pub const RECENT_LIMIT: i64 = 4;

#[derive(Clone)]
pub struct ProductRepository {
    pub pool: sqlx::Pool<Postgres>,
}

impl ProductRepository {
    pub fn new(pool: sqlx::Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// The four highest skus, oldest first and newest last.
    pub async fn list_recent(&self) -> Result<Vec<Product>> {
        let mut recent = sqlx::query_as::<_, Product>(
            r#"SELECT name, price, img, sku, paypal
                FROM products
                ORDER BY sku DESC
                LIMIT $1"#,
        )
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        recent.reverse();
        debug!("list_recent returned {} rows", recent.len());
        Ok(recent)
    }

    /// Products whose name contains `term` literally, in sku order.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>> {
        let matches = sqlx::query_as::<_, Product>(
            r#"SELECT name, price, img, sku, paypal
                FROM products
                WHERE name LIKE $1 ESCAPE '\'
                ORDER BY sku"#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        debug!("search {:?} matched {} rows", term, matches.len());
        Ok(matches)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(sku) FROM products"#)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Rows at 1-based inclusive positions `start..=end` in sku order.
    ///
    /// `start` below 1 is treated as 1 and an empty range (`end < start`)
    /// yields no rows without touching the database. Positions past the end
    /// of the table are simply absent from the result.
    pub async fn subset(&self, start: i64, end: i64) -> Result<Vec<Product>> {
        let Some(window) = Window::new(start, end) else {
            debug!("subset {}..={} is empty", start, end);
            return Ok(Vec::new());
        };
        let subset = sqlx::query_as::<_, Product>(
            r#"SELECT name, price, img, sku, paypal
                FROM products
                ORDER BY sku
                LIMIT $1 OFFSET $2"#,
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;
        debug!("subset {}..={} returned {} rows", start, end, subset.len());
        Ok(subset)
    }

    pub async fn list_all(&self) -> Result<Vec<Product>> {
        Ok(sqlx::query_as::<_, Product>(
            "SELECT name, price, img, sku, paypal FROM products ORDER BY sku ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    /// Looks up one product and attaches its sizes. `None` when no product
    /// has this sku; the sizes query is skipped in that case.
    pub async fn get_by_sku(&self, sku: i32) -> Result<Option<ProductDetail>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT name, price, img, sku, paypal FROM products WHERE sku = $1",
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        let Some(product) = product else {
            debug!("sku {} not found", sku);
            return Ok(None);
        };

        let sizes: Vec<String> = sqlx::query_scalar(
            r#"SELECT s.size
                FROM products_sizes ps
                INNER JOIN sizes s ON ps.size_id = s.id
                WHERE ps.product_sku = $1
                ORDER BY s."order""#,
        )
        .bind(sku)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ProductDetail::new(product, sizes)))
    }
}

/// `%term%` with LIKE wildcards in `term` escaped by backslash.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
