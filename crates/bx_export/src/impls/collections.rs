use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use alloc::vec::Vec;
use core::hash::BuildHasher;

use crate::{Export, ExportKind, Retrieved};

#[inline]
fn sequence<'a, T: Export + 'a>(items: impl Iterator<Item = &'a T> + 'a) -> ExportKind<'a> {
    ExportKind::Sequence(Box::new(items.map(|item| Retrieved::Borrowed(item))))
}

#[inline]
fn map<'a, K: Export + 'a, V: Export + 'a>(
    entries: impl Iterator<Item = (&'a K, &'a V)> + 'a,
) -> ExportKind<'a> {
    ExportKind::Map(Box::new(
        entries.map(|(k, v)| (Retrieved::Borrowed(k), Retrieved::Borrowed(v))),
    ))
}

// -----------------------------------------------------------------------------
// Sequences

impl<T: Export> Export for [T] {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        sequence(self.iter())
    }
}

impl<T: Export, const N: usize> Export for [T; N] {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        sequence(self.iter())
    }
}

macro_rules! impl_sequence {
    ($($ty:ident),+) => {
        $(
            impl<T: Export> Export for $ty<T> {
                #[inline]
                fn export_kind(&self) -> ExportKind<'_> {
                    sequence(self.iter())
                }
            }
        )+
    };
}

impl_sequence!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Export, S: BuildHasher> Export for std::collections::HashSet<T, S> {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        sequence(self.iter())
    }
}

impl<T: Export, S: BuildHasher> Export for bx_utils::hash::hashbrown::HashSet<T, S> {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        sequence(self.iter())
    }
}

// -----------------------------------------------------------------------------
// Maps

impl<K: Export, V: Export> Export for BTreeMap<K, V> {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        map(self.iter())
    }
}

impl<K: Export, V: Export, S: BuildHasher> Export for std::collections::HashMap<K, V, S> {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        map(self.iter())
    }
}

impl<K: Export, V: Export, S: BuildHasher> Export for bx_utils::hash::hashbrown::HashMap<K, V, S> {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        map(self.iter())
    }
}
