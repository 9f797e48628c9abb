use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// Opaque, copyable reference to a value stored in an [`Arena`].
///
/// `K` is a marker type separating handle families (textures, fonts, text)
/// at compile time. Equality is slot + generation, so two handles compare
/// equal only if they were returned by the same `insert`.
pub struct Handle<K> {
    index: u32,
    generation: u32,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Handle<K> {
    #[inline]
    const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation, _kind: PhantomData }
    }

    /// Slot index inside the owning arena.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot at the time the handle was issued.
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

// Manual impls: derives would require `K: Clone`, `K: Eq`, ... on the marker.
impl<K> Clone for Handle<K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Handle<K> {}

impl<K> PartialEq for Handle<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<K> Eq for Handle<K> {}

impl<K> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<K> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

struct Slot<V> {
    generation: u32,
    value: Option<V>,
}

/// Slot storage with generation-checked handles.
///
/// Removing a value bumps its slot generation, so stale handles resolve to
/// `None` even after the slot is reused.
pub struct Arena<K, V> {
    slots: Vec<Slot<V>>,
    free: Vec<u32>,
    len: usize,
    _kind: PhantomData<fn() -> K>,
}

impl<K, V> Arena<K, V> {
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), len: 0, _kind: PhantomData }
    }

    /// Stores `value` and returns its handle.
    pub fn insert(&mut self, value: V) -> Handle<K> {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Handle::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, value: Some(value) });
        Handle::new(index, 0)
    }

    #[inline]
    pub fn get(&self, handle: Handle<K>) -> Option<&V> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.value.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle<K>) -> Option<&mut V> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.value.as_mut())
    }

    #[inline]
    pub fn contains(&self, handle: Handle<K>) -> bool {
        self.get(handle).is_some()
    }

    /// Removes and returns the value behind `handle`.
    ///
    /// Returns `None` for stale or foreign handles; the arena is left untouched.
    pub fn remove(&mut self, handle: Handle<K>) -> Option<V> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }

        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(value)
    }

    /// Number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K, V> Default for Arena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::TextureKind;

    type Tex = Arena<TextureKind, &'static str>;

    #[test]
    fn insert_then_get() {
        let mut arena = Tex::new();
        let h = arena.insert("ship.png");
        assert_eq!(arena.get(h), Some(&"ship.png"));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn removed_handle_is_stale() {
        let mut arena = Tex::new();
        let h = arena.insert("ship.png");
        assert_eq!(arena.remove(h), Some("ship.png"));
        assert!(arena.get(h).is_none());
        assert_eq!(arena.remove(h), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn reused_slot_does_not_resurrect_old_handle() {
        let mut arena = Tex::new();
        let old = arena.insert("a");
        arena.remove(old);

        let new = arena.insert("b");
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(arena.get(old).is_none());
        assert_eq!(arena.get(new), Some(&"b"));
    }
}
