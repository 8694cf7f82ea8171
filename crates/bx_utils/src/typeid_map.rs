use core::any::TypeId;
use core::fmt::Debug;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::hash::NoOpHashState;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// `TypeId` already carries a well-distributed hash, so the map skips
/// hashing and uses the bits as they are.
///
/// Only the operations needed by per-type caches are exposed, which keeps
/// the backing container replaceable.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use bx_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.get_or_insert(TypeId::of::<u8>(), || "u8");
///
/// assert_eq!(map.get(&TypeId::of::<u8>()), Some(&"u8"));
/// assert!(!map.contains(&TypeId::of::<u16>()));
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty `TypeIdMap`.
    ///
    /// Usable in `static` initializers.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Returns a reference to the value stored for `type_id`.
    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Returns the value stored for `type_id`, inserting `f()` first if
    /// the key is absent.
    ///
    /// `f` runs only when the key is absent, so when two writers race the
    /// first insertion wins and the later value is dropped unused.
    ///
    /// ```
    /// use core::any::TypeId;
    /// use bx_utils::TypeIdMap;
    ///
    /// let mut map = TypeIdMap::new();
    /// let id = TypeId::of::<str>();
    /// assert_eq!(*map.get_or_insert(id, || 1), 1);
    /// assert_eq!(*map.get_or_insert(id, || 2), 1);
    /// ```
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Returns `true` if a value is stored for `type_id`.
    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}
