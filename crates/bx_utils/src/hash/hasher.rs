//! Provide `FixedHasher` and `NoOpHasher`.
//!
//! `FixedHasher` wraps *foldhash* with a constant seed, so two processes
//! hash the same key to the same value.
//!
//! `NoOpHasher` passes an already well-distributed `u64` (such as the
//! bits of a [`TypeId`](core::any::TypeId)) straight through.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5EED_B0A7_C0DE_2611);

/// The hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A hash state with a compile-time seed.
///
/// Used for the name sets of export models, whose keys are short strings.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use bx_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("name");
/// let b = FixedHashState.hash_one("name");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that keeps the last `u64` it was given.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // Fallback for keys that do not go through `write_u64`.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Hash state for keys that are already hashes.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::Hash;

    #[test]
    fn no_op_keeps_the_written_u64() {
        let mut hasher = NoOpHashState.build_hasher();
        7_u64.hash(&mut hasher);
        assert_eq!(hasher.finish(), 7);
    }

    #[test]
    fn fixed_state_is_deterministic() {
        assert_eq!(FixedHashState.hash_one("name"), FixedHashState.hash_one("name"));
        assert_ne!(FixedHashState.hash_one("name"), FixedHashState.hash_one("nom"));
    }
}
