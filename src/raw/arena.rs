use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};

use super::handle::Handle;

/// Returns an id no other arena in this process has been given.
fn new_arena_id() -> u32 {
    static ARENA_COUNTER: AtomicU32 = AtomicU32::new(1);
    loop {
        // Zero marks an arena that has not allocated yet.
        let id = ARENA_COUNTER.fetch_add(1, Ordering::Relaxed);
        if id != 0 {
            return id;
        }
    }
}

#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    element: Option<T>,
}

#[derive(Clone)]
pub(crate) struct Arena<T> {
    /// Assigned on first allocation; clones share it, so their handles stay interchangeable.
    id: u32,
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            id: 0,
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            id: 0,
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    #[cfg(test)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if self.id == 0 {
            self.id = new_arena_id();
        }

        if let Some(index) = self.free.pop() {
            // Reuse a free slot under its current generation.
            let slot = &mut self.slots[index];
            slot.element = Some(element);
            Handle::new(self.id, index, slot.generation)
        } else {
            // Strict less-than keeps every index representable by `Handle`.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Slot {
                generation: 0,
                element: Some(element),
            });
            Handle::new(self.id, self.slots.len() - 1, 0)
        }
    }

    /// Returns the slot for `handle` if this arena issued it and the generation still matches.
    #[inline]
    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        if handle.arena() != self.id {
            return None;
        }
        self.slots.get(handle.to_index()).filter(|slot| slot.generation == handle.generation())
    }

    #[inline]
    fn slot_mut(&mut self, handle: Handle) -> Option<&mut Slot<T>> {
        if handle.arena() != self.id {
            return None;
        }
        self.slots.get_mut(handle.to_index()).filter(|slot| slot.generation == handle.generation())
    }

    /// Returns the element for `handle`, or `None` if the handle is stale or foreign.
    #[inline]
    pub(crate) fn try_get(&self, handle: Handle) -> Option<&T> {
        self.slot(handle).and_then(|slot| slot.element.as_ref())
    }

    #[inline]
    pub(crate) fn try_get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slot_mut(handle).and_then(|slot| slot.element.as_mut())
    }

    #[inline]
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.try_get(handle).is_some()
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.try_get(handle).expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.try_get_mut(handle).expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Removes the element for `handle` and retires the handle for good.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = self.slot_mut(handle).expect("`Arena::take()` - `handle` is invalid!");
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.to_index());
        element
    }

    /// Frees every slot. Outstanding handles stay stale because generations are kept.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.element.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        // Hand out low indices first.
        self.free.reverse();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert_eq!(arena.capacity(), 10);
    }

    #[test]
    fn reused_slot_does_not_revive_old_handle() {
        let mut arena: Arena<u32> = Arena::new();
        let first = arena.alloc(1);
        assert_eq!(arena.take(first), 1);

        let second = arena.alloc(2);
        assert_eq!(first.to_index(), second.to_index());
        assert!(!arena.contains(first));
        assert_eq!(arena.try_get(second), Some(&2));
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut arena: Arena<u32> = Arena::new();
        let handles: Vec<Handle> = (0..4).map(|i| arena.alloc(i)).collect();
        arena.clear();

        assert!(arena.is_empty());
        assert!(handles.iter().all(|&h| !arena.contains(h)));

        let reused = arena.alloc(9);
        assert_eq!(reused.to_index(), 0);
        assert_eq!(*arena.get(reused), 9);
    }

    #[test]
    fn handles_from_another_arena_are_rejected() {
        let mut first: Arena<u32> = Arena::new();
        let mut second: Arena<u32> = Arena::new();
        let foreign = first.alloc(1);
        let local = second.alloc(2);

        assert_eq!(foreign.to_index(), local.to_index());
        assert_eq!(foreign.generation(), local.generation());
        assert!(!second.contains(foreign));
        assert_eq!(second.try_get_mut(foreign), None);

        let cloned = first.clone();
        assert_eq!(cloned.try_get(foreign), Some(&1));
    }

    #[test]
    #[should_panic(expected = "`Arena::take()` - `handle` is invalid!")]
    fn double_take_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let handle = arena.alloc(1);
        arena.take(handle);
        arena.take(handle);
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut retired: Vec<Handle> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::Get(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        prop_assert_eq!(*arena.get(handle), model[index].1);
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *arena.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        let value1 = arena.take(handle);
                        let (_, value2) = model.swap_remove(index);
                        prop_assert_eq!(value1, value2);
                        retired.push(handle);
                    }
                    Operation::Clear => {
                        arena.clear();
                        retired.extend(model.drain(..).map(|(handle, _)| handle));
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());

                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
                for &handle in &retired {
                    prop_assert!(!arena.contains(handle));
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Get(usize),
        GetMut(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => any::<usize>().prop_map(Operation::Get),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            5 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
