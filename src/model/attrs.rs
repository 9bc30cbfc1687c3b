//! Attribute maps with identity.

use std::fmt;
use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

/// Identity token of an [`Attrs`] map.
///
/// Assigned once when the map is created and shared by its clones. Two
/// maps with equal contents built separately have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttrsId(u64);

static NEXT_ATTRS_ID: AtomicU64 = AtomicU64::new(0);

impl AttrsId {
    fn next() -> Self {
        AttrsId(NEXT_ATTRS_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Immutable, ordered attribute map of a node or mark.
///
/// Values are JSON values and may nest arrays. Equality is structural;
/// use [`Attrs::id`] or [`Attrs::same`] when identity matters.
#[derive(Clone)]
pub struct Attrs {
    id: AttrsId,
    map: Arc<Map<String, Value>>,
}

impl Attrs {
    pub fn new(map: Map<String, Value>) -> Self {
        Self {
            id: AttrsId::next(),
            map: Arc::new(map),
        }
    }

    pub fn empty() -> Self {
        Self::new(Map::new())
    }

    /// Build from key/value pairs, keeping their order.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::new(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn id(&self) -> AttrsId {
        self.id
    }

    /// Whether both handles refer to the very same map.
    pub fn same(&self, other: &Attrs) -> bool {
        self.id == other.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// String value of `key`, if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Weak handle on the shared storage, dead once every clone is dropped.
    pub(crate) fn downgrade(&self) -> Weak<Map<String, Value>> {
        Arc::downgrade(&self.map)
    }

    /// Copy the listed keys, in the given order, into a JSON object.
    /// Missing keys are skipped. Handy for templates that expose a subset
    /// of attributes on the element they build.
    pub fn pick(&self, keys: &[&str]) -> Map<String, Value> {
        keys.iter()
            .filter_map(|k| self.map.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect()
    }
}

impl Default for Attrs {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Attrs {
    fn eq(&self, other: &Self) -> bool {
        self.same(other) || self.map == other.map
    }
}

impl fmt::Debug for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl From<Map<String, Value>> for Attrs {
    fn from(map: Map<String, Value>) -> Self {
        Self::new(map)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_identity_vs_equality() {
        let a = Attrs::from_pairs([("href", json!("x"))]);
        let b = Attrs::from_pairs([("href", json!("x"))]);
        let a2 = a.clone();

        assert_eq!(a, b);
        assert!(!a.same(&b));
        assert!(a.same(&a2));
        assert_eq!(a.id(), a2.id());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_clone_shares_storage() {
        let a = Attrs::from_pairs([("data", json!(["img", {"src": "x"}]))]);
        let b = a.clone();
        assert!(std::ptr::eq(a.get("data").unwrap(), b.get("data").unwrap()));
    }

    #[test]
    fn test_pick_keeps_requested_order() {
        let attrs = Attrs::from_pairs([
            ("title", json!("t")),
            ("src", json!("s")),
            ("extra", json!(1)),
        ]);
        let picked = attrs.pick(&["src", "alt", "title"]);
        let keys: Vec<_> = picked.keys().map(String::as_str).collect();
        assert_eq!(keys, ["src", "title"]);
    }
}
