//! EdgeCast cache-management operations
//!
//! Wraps the vendor's edge-cache endpoint: purging cached path patterns and
//! preloading URLs onto the edge.

pub mod client;
pub mod mock;

pub use client::CacheClient;
pub use mock::MockCacheClient;

use crate::models::MediaType;
use async_trait::async_trait;

#[async_trait]
pub trait CacheService: Send + Sync {
    async fn purge(&self, media_type: MediaType, pattern: &str) -> bool;
    async fn load(&self, media_type: MediaType, url: &str) -> bool;
}
