use super::CacheService;
use crate::models::MediaType;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory [`CacheService`] that records calls instead of hitting the API.
#[derive(Clone)]
pub struct MockCacheClient {
    purged: Arc<Mutex<Vec<(MediaType, String)>>>,
    loaded: Arc<Mutex<Vec<(MediaType, String)>>>,
    results: Arc<Mutex<Vec<bool>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockCacheClient {
    pub fn new() -> Self {
        Self {
            purged: Arc::new(Mutex::new(Vec::new())),
            loaded: Arc::new(Mutex::new(Vec::new())),
            results: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue an outcome for an upcoming call. Outcomes cycle in order; with
    /// none queued every call reports success.
    pub fn with_result(self, result: bool) -> Self {
        self.results.lock().unwrap().push(result);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn purged_paths(&self) -> Vec<(MediaType, String)> {
        self.purged.lock().unwrap().clone()
    }

    pub fn loaded_urls(&self) -> Vec<(MediaType, String)> {
        self.loaded.lock().unwrap().clone()
    }

    fn next_result(&self) -> bool {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let results = self.results.lock().unwrap();
        if results.is_empty() {
            true
        } else {
            results[(*count - 1) % results.len()]
        }
    }
}

impl Default for MockCacheClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for MockCacheClient {
    async fn purge(&self, media_type: MediaType, pattern: &str) -> bool {
        self.purged
            .lock()
            .unwrap()
            .push((media_type, pattern.to_string()));
        self.next_result()
    }

    async fn load(&self, media_type: MediaType, url: &str) -> bool {
        self.loaded
            .lock()
            .unwrap()
            .push((media_type, url.to_string()));
        self.next_result()
    }
}
