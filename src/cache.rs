//! In-process cache for aggregate listings.
//!
//! Entries expire after a fixed time-to-live; writers that change the
//! underlying rows call [`ListingCache::flush`] so the next read recomputes
//! from the store. Every flush bumps a generation counter, and a listing
//! loaded under an older generation is never stored.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;

use crate::models::Product;

const PRODUCTS_KEY: &str = "products";

#[derive(Debug, Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
}

#[derive(Clone)]
pub struct ListingCache {
    inner: Cache<String, CacheValue>,
    generation: Arc<AtomicU64>,
}

impl ListingCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(100)
            .time_to_live(ttl)
            .build();
        Self {
            inner,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn get_products(&self) -> Option<Arc<Vec<Product>>> {
        match self.inner.get(PRODUCTS_KEY).await {
            Some(CacheValue::Products(products)) => Some(products),
            None => None,
        }
    }

    /// Token to take before reading the rows a listing is built from.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Store a listing read under `generation`. Nothing is kept when a flush
    /// happened since, so a stale snapshot cannot outlive the write that
    /// invalidated it.
    pub async fn set_products(&self, products: Vec<Product>, generation: u64) -> Arc<Vec<Product>> {
        let products = Arc::new(products);
        if self.generation() != generation {
            return products;
        }

        self.inner
            .insert(
                PRODUCTS_KEY.to_string(),
                CacheValue::Products(Arc::clone(&products)),
            )
            .await;

        // A flush may have landed between the check and the insert.
        if self.generation() != generation {
            self.inner.invalidate(PRODUCTS_KEY).await;
        }
        products
    }

    /// Evict every cached listing.
    pub async fn flush(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.invalidate_all();
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i32, stock: i32) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: format!("Product {id}"),
            description: "test".into(),
            category_id: 1,
            price: 1000,
            stock,
            sold: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn stores_and_returns_product_listing() {
        let cache = ListingCache::new(Duration::from_secs(60));
        assert!(cache.get_products().await.is_none());

        let generation = cache.generation();
        cache
            .set_products(vec![product(1, 10), product(2, 3)], generation)
            .await;

        let cached = cache.get_products().await.expect("cached listing");
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[1].stock, 3);
    }

    #[tokio::test]
    async fn flush_evicts_listing() {
        let cache = ListingCache::new(Duration::from_secs(60));
        cache.set_products(vec![product(1, 10)], cache.generation()).await;

        cache.flush().await;

        assert!(cache.get_products().await.is_none());
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = ListingCache::new(Duration::from_millis(20));
        cache.set_products(vec![product(1, 10)], cache.generation()).await;

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(cache.get_products().await.is_none());
    }

    #[tokio::test]
    async fn listing_read_before_a_flush_is_not_stored() {
        let cache = ListingCache::new(Duration::from_secs(60));
        let generation = cache.generation();

        cache.flush().await;
        let returned = cache.set_products(vec![product(1, 10)], generation).await;

        assert_eq!(returned.len(), 1);
        assert!(cache.get_products().await.is_none());

        cache.set_products(vec![product(1, 5)], cache.generation()).await;
        let cached = cache.get_products().await.expect("fresh listing");
        assert_eq!(cached[0].stock, 5);
    }
}
