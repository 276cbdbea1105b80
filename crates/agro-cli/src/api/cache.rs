//! GET response cache keyed by request path

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    pub fn put(&self, key: String, value: Value) {
        self.lock().insert(key, value);
    }

    /// Drop every entry under `prefix`, query strings included.
    /// Returns how many entries were removed.
    pub fn invalidate(&self, prefix: &str) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !is_under(key, prefix));
        before - entries.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        // A poisoned map only ever holds complete entries
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn is_under(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

/// Collection a path belongs to: everything before the first numeric
/// segment. `/api/barter/3/status` -> `/api/barter`.
pub fn collection_of(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    let segments: Vec<&str> = path
        .split('/')
        .take_while(|segment| segment.is_empty() || segment.parse::<i64>().is_err())
        .collect();
    segments.join("/").trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_of() {
        assert_eq!(collection_of("/api/barter"), "/api/barter");
        assert_eq!(collection_of("/api/barter/3/status"), "/api/barter");
        assert_eq!(collection_of("/api/dao/proposals/12/vote"), "/api/dao/proposals");
        assert_eq!(collection_of("/api/liquidity/pools?risk=low"), "/api/liquidity/pools");
    }

    #[test]
    fn test_invalidate_drops_collection_and_queries() {
        let cache = ResponseCache::new();
        cache.put("/api/barter".into(), json!([]));
        cache.put("/api/barter?userId=2".into(), json!([]));
        cache.put("/api/barter/1".into(), json!({"id": 1}));
        cache.put("/api/microjobs".into(), json!([]));

        assert_eq!(cache.invalidate("/api/barter"), 3);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("/api/microjobs").is_some());
        assert!(cache.get("/api/barter?userId=2").is_none());
    }

    #[test]
    fn test_invalidate_respects_segment_boundaries() {
        let cache = ResponseCache::new();
        cache.put("/api/dao/proposals".into(), json!([]));
        cache.put("/api/dao/proposalsarchive".into(), json!([]));

        assert_eq!(cache.invalidate("/api/dao/proposals"), 1);
        assert!(cache.get("/api/dao/proposalsarchive").is_some());
    }
}
