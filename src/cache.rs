use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use serde_json::Value;

use crate::realtime::{ChangeBroker, Subscription};

pub const SITE_SETTINGS: &str = "site-settings";
pub const HEADER_CONTENT: &str = "header-content";
pub const FOOTER_CONTENT: &str = "footer-content";
pub const COMPANY_BRANDING: &str = "company-branding";
pub const SOCIAL_MEDIA: &str = "social-media";
pub const LOGO_WIDTH: &str = "logo-width";
pub const THEME_COLORS: &str = "theme-colors";

lazy_static! {
    /// Cache keys to drop when a table changes. Settings feed several
    /// derived views of the site chrome, so one table fans out to many keys.
    static ref TABLE_INVALIDATIONS: HashMap<&'static str, &'static [&'static str]> = {
        let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        map.insert(
            "site_settings",
            &[
                SITE_SETTINGS,
                HEADER_CONTENT,
                FOOTER_CONTENT,
                COMPANY_BRANDING,
                SOCIAL_MEDIA,
                LOGO_WIDTH,
                THEME_COLORS,
            ],
        );
        map
    };
}

/// Cache keys invalidated by a change on `table`.
pub fn keys_for_table(table: &str) -> &'static [&'static str] {
    TABLE_INVALIDATIONS
        .get(table)
        .copied()
        .unwrap_or(&[])
}

/// String-keyed cache of loaded JSON documents.
///
/// Cheap to clone; all clones share the same entries.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, loading and storing it on a miss.
    ///
    /// Load errors are propagated and nothing is cached, so a transient
    /// failure does not poison the key.
    pub fn get_or_load<E, F>(&self, key: &str, load: F) -> Result<Value, E>
    where
        F: FnOnce() -> Result<Value, E>,
    {
        {
            let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            if let Some(value) = entries.get(key) {
                return Ok(value.clone());
            }
        }

        // The lock is not held across the load; a concurrent load of the
        // same key just does the work twice.
        let value = load()?;
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// Drop one cached key.
    pub fn invalidate(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.remove(key);
    }

    /// Drop every key registered for `table`.
    pub fn invalidate_table(&self, table: &str) {
        for key in keys_for_table(table) {
            self.invalidate(key);
        }
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.contains_key(key)
    }
}

/// Wire the cache to the broker: a change on any registered table drops its
/// cache keys so the next read re-fetches. The returned subscriptions must
/// be kept alive for the lifetime of the server.
pub fn attach_invalidation(broker: &ChangeBroker, cache: &QueryCache) -> Vec<Subscription> {
    TABLE_INVALIDATIONS
        .keys()
        .map(|table| {
            let cache = cache.clone();
            let table_name = table.to_string();
            broker.subscribe(table, move |_event| {
                cache.invalidate_table(&table_name);
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::realtime::ChangeEvent;

    #[test]
    fn get_or_load_caches_the_first_result() {
        let cache = QueryCache::new();
        let mut loads = 0;

        for _ in 0..3 {
            let value = cache
                .get_or_load(HEADER_CONTENT, || {
                    loads += 1;
                    Ok::<_, ()>(json!({"title": "Verdura"}))
                })
                .expect("expected success");
            assert_eq!(value["title"], "Verdura");
        }

        assert_eq!(loads, 1);
    }

    #[test]
    fn load_errors_are_not_cached() {
        let cache = QueryCache::new();

        let failed: Result<Value, &str> = cache.get_or_load(SITE_SETTINGS, || Err("db down"));
        assert!(failed.is_err());
        assert!(!cache.contains(SITE_SETTINGS));

        let value = cache
            .get_or_load(SITE_SETTINGS, || Ok::<_, ()>(json!(1)))
            .expect("expected success");
        assert_eq!(value, json!(1));
    }

    #[test]
    fn settings_change_invalidates_exactly_the_chrome_keys() {
        let broker = ChangeBroker::new();
        let cache = QueryCache::new();
        let _subs = attach_invalidation(&broker, &cache);

        for key in keys_for_table("site_settings") {
            cache
                .get_or_load(key, || Ok::<_, ()>(json!("cached")))
                .expect("expected success");
        }
        cache
            .get_or_load("unrelated-key", || Ok::<_, ()>(json!("survivor")))
            .expect("expected success");

        broker.publish(ChangeEvent::update(
            "site_settings",
            &json!({"key": "footer"}),
        ));

        for key in keys_for_table("site_settings") {
            assert!(!cache.contains(key), "{key} should have been invalidated");
        }
        assert!(cache.contains("unrelated-key"));
    }
}
