use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;

/// Shared, immutable element name
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct InternedString(Arc<str>);

impl InternedString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when both handles point at the same interned allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Live handles to this allocation, the interner's own entry included
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl Deref for InternedString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InternedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for InternedString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InternedString {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for InternedString {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl PartialEq<str> for InternedString {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for InternedString {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for InternedString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Deduplicates element names across every tree a parser builds.
///
/// Lookups take the read lock; only the first sighting of a name takes the
/// write lock.
#[derive(Debug)]
pub struct StringInterner {
    strings: RwLock<HashSet<Arc<str>>>,
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            strings: RwLock::new(HashSet::new()),
        }
    }

    pub fn intern(&self, s: &str) -> InternedString {
        if let Some(interned) = self.strings.read().get(s) {
            return InternedString(Arc::clone(interned));
        }

        let mut write_guard = self.strings.write();
        if let Some(interned) = write_guard.get(s) {
            return InternedString(Arc::clone(interned));
        }
        let interned: Arc<str> = Arc::from(s);
        write_guard.insert(Arc::clone(&interned));
        InternedString(interned)
    }

    /// Number of distinct names seen so far
    pub fn len(&self) -> usize {
        self.strings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_shares_allocation() {
        let interner = StringInterner::new();
        let a = interner.intern("child");
        let b = interner.intern("child");
        let c = interner.intern("other");
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(interner.len(), 2);
        assert_eq!(a.handle_count(), 3);

        drop(interner);
        assert_eq!(a.handle_count(), 2);
        assert_eq!(c.handle_count(), 1);
    }

    #[test]
    fn test_interned_string_behaves_like_str() {
        let name = InternedString::from("catalog");
        assert_eq!(name.as_str(), "catalog");
        assert_eq!(name, "catalog");
        assert_eq!(name.len(), 7);
        assert_eq!(name.to_string(), "catalog");
    }

    #[test]
    fn test_interner_is_shareable_across_threads() {
        let interner = Arc::new(StringInterner::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let interner = Arc::clone(&interner);
                std::thread::spawn(move || interner.intern("shared"))
            })
            .collect();
        let names: Vec<InternedString> = handles
            .into_iter()
            .filter_map(|handle| handle.join().ok())
            .collect();
        assert_eq!(names.len(), 4);
        assert!(names.windows(2).all(|pair| match pair {
            [left, right] => left.ptr_eq(right),
            _ => false,
        }));
        assert_eq!(interner.len(), 1);
    }
}
