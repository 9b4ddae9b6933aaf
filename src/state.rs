use std::time::Duration;

use crate::{
    cache::ListingCache,
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
    middleware::token::TokenCodec,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub cache: ListingCache,
    pub tokens: TokenCodec,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        Self {
            orm: orm_from_pool(pool.clone()),
            pool,
            cache: ListingCache::new(Duration::from_secs(config.product_cache_ttl_secs)),
            tokens: TokenCodec::new(&config.jwt_secret, config.jwt_enforce_expiry),
        }
    }
}
