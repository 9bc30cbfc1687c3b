//! Refuses to render template arrays that come straight out of node or mark
//! attributes.
//!
//! An attribute value shaped like a template (`["img", {"onerror": ...}]`)
//! is data, not markup. When a template hands such a value back as its
//! output, rendering it would let document content pick arbitrary tags.
//! The guard records where those values live and the renderer checks every
//! JSON array against that list before treating it as an element.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use serde_json::{Map, Value};

use crate::model::{Attrs, AttrsId};

/// Cache size above which entries for dropped attribute maps are evicted.
const PRUNE_THRESHOLD: usize = 4096;

/// Addresses of the template-shaped values inside one attribute map.
#[derive(Debug, Default)]
pub struct Suspicious {
    addrs: Vec<usize>,
}

impl Suspicious {
    fn scan(attrs: &Attrs) -> Self {
        let mut addrs = Vec::new();
        for (_, value) in attrs.iter() {
            collect(value, &mut addrs);
        }
        Self { addrs }
    }

    /// Whether `value` is one of the recorded values, by identity.
    pub fn contains(&self, value: &Value) -> bool {
        let addr = value as *const Value as usize;
        self.addrs.contains(&addr)
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }
}

fn collect(value: &Value, addrs: &mut Vec<usize>) {
    let Value::Array(items) = value else {
        return;
    };
    match items.first() {
        Some(Value::String(_)) => addrs.push(value as *const Value as usize),
        _ => {
            for item in items {
                collect(item, addrs);
            }
        }
    }
}

struct Entry {
    storage: Weak<Map<String, Value>>,
    suspicious: Arc<Suspicious>,
}

/// Per-serializer cache of [`Suspicious`] sets keyed by attribute identity.
///
/// Attribute maps are immutable, so a set computed once stays valid for as
/// long as the map is alive.
#[derive(Default)]
pub struct SuspiciousGuard {
    cache: RwLock<HashMap<AttrsId, Entry>>,
}

impl SuspiciousGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The suspicious values of `attrs`, computed on first request.
    pub fn suspicious(&self, attrs: &Attrs) -> Arc<Suspicious> {
        if attrs.is_empty() {
            return Arc::new(Suspicious::default());
        }

        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = cache.get(&attrs.id()) {
                return Arc::clone(&entry.suspicious);
            }
        }

        let suspicious = Arc::new(Suspicious::scan(attrs));
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if cache.len() >= PRUNE_THRESHOLD {
            cache.retain(|_, entry| entry.storage.strong_count() > 0);
        }
        let entry = cache.entry(attrs.id()).or_insert_with(|| {
            tracing::trace!(
                attrs = ?attrs.id(),
                count = suspicious.len(),
                "recorded suspicious attribute values"
            );
            Entry {
                storage: attrs.downgrade(),
                suspicious,
            }
        });
        Arc::clone(&entry.suspicious)
    }

    /// Suspicious sets of every source, skipping the empty ones.
    pub fn collect(&self, sources: &[&Attrs]) -> Vec<Arc<Suspicious>> {
        sources
            .iter()
            .map(|attrs| self.suspicious(attrs))
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Number of cached attribute maps.
    pub fn cached(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl std::fmt::Debug for SuspiciousGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuspiciousGuard")
            .field("cached", &self.cached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_records_template_shaped_arrays_only() {
        let attrs = Attrs::from_pairs([
            ("plain", json!("img")),
            ("numbers", json!([1, 2, 3])),
            ("spec", json!(["img", {"src": "x"}])),
            ("nested", json!([[["script", "alert(1)"]], 4])),
            ("object", json!({"inner": ["b", 0]})),
        ]);
        let set = Suspicious::scan(&attrs);
        assert_eq!(set.len(), 2);
        assert!(set.contains(attrs.get("spec").unwrap()));

        let nested = &attrs.get("nested").unwrap()[0][0];
        assert!(set.contains(nested));
        assert!(!set.contains(&json!(["img", {"src": "x"}])));
        assert!(!set.contains(&attrs.get("object").unwrap()["inner"]));
    }

    #[test]
    fn test_spec_arrays_are_not_descended() {
        let attrs = Attrs::from_pairs([("spec", json!(["div", ["span", 0]]))]);
        let set = Suspicious::scan(&attrs);
        assert_eq!(set.len(), 1);
        assert!(!set.contains(&attrs.get("spec").unwrap()[1]));
    }

    #[test]
    fn test_cache_keyed_by_identity() {
        let guard = SuspiciousGuard::new();
        let a = Attrs::from_pairs([("spec", json!(["p", 0]))]);
        let first = guard.suspicious(&a);
        let again = guard.suspicious(&a.clone());
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(guard.cached(), 1);

        let b = Attrs::from_pairs([("spec", json!(["p", 0]))]);
        let other = guard.suspicious(&b);
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(guard.cached(), 2);
    }

    #[test]
    fn test_empty_attrs_are_not_cached() {
        let guard = SuspiciousGuard::new();
        assert!(guard.suspicious(&Attrs::empty()).is_empty());
        assert_eq!(guard.cached(), 0);
        assert!(guard.collect(&[&Attrs::empty()]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_only_stored_values_are_flagged(tags in prop::collection::vec("[a-z]{1,6}", 1..6)) {
            let list = Value::Array(tags.iter().map(|t| json!([t, 0])).collect());
            let attrs = Attrs::from_pairs([("list", list)]);
            let set = Suspicious::scan(&attrs);
            prop_assert_eq!(set.len(), tags.len());

            let stored = attrs.get("list").unwrap();
            let copy = stored.clone();
            for (original, fresh) in stored.as_array().unwrap().iter().zip(copy.as_array().unwrap()) {
                prop_assert!(set.contains(original));
                prop_assert!(!set.contains(fresh));
            }
        }
    }
}
