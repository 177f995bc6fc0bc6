use core::num::NonZero;

#[cfg(test)]
pub(crate) type RawHandle = u16;
#[cfg(not(test))]
pub(crate) type RawHandle = u32;

/// A generational index into an `Arena`.
///
/// The slot index is stored off-by-one in a `NonZero` so that `Option<Handle>` is free. The
/// generation is the slot's generation at allocation time; once the slot is freed, every handle
/// issued for it becomes stale, even if the slot is later reused. The arena id ties the handle to
/// the arena that issued it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Handle {
    arena: u32,
    index: NonZero<RawHandle>,
    generation: u32,
}

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(arena: u32, index: usize, generation: u32) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` > `Handle::MAX`!");
        // SAFETY: `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        let index = NonZero::new((index + 1) as RawHandle).unwrap();
        Self {
            arena,
            index,
            generation,
        }
    }

    #[inline]
    pub(crate) const fn arena(self) -> u32 {
        self.arena
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.index.get() - 1) as usize
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Verify our assumptions about `Handle` and the niche optimization.
    assert_eq_size!(Handle, Option<Handle>);

    #[test]
    #[should_panic(expected = "`Handle::new()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::new(1, Handle::MAX + 1, 0);
    }

    #[test]
    fn generations_distinguish_handles() {
        assert_ne!(Handle::new(1, 3, 0), Handle::new(1, 3, 1));
        assert_eq!(Handle::new(1, 3, 7), Handle::new(1, 3, 7));
    }

    #[test]
    fn arenas_distinguish_handles() {
        assert_ne!(Handle::new(1, 3, 0), Handle::new(2, 3, 0));
    }

    proptest! {
        #[test]
        fn handle_round_trip(arena in 1..u32::MAX, index in 0..=Handle::MAX, generation in any::<u32>()) {
            let handle = Handle::new(arena, index, generation);
            prop_assert_eq!(handle.arena(), arena);
            prop_assert_eq!(handle.to_index(), index);
            prop_assert_eq!(handle.generation(), generation);
        }
    }
}
