use core::any::Any;
use core::fmt;

use alloc::boxed::Box;

use crate::Property;
use crate::pruner::TreePruner;

// -----------------------------------------------------------------------------
// Range

/// The slice of a sequence that gets written.
///
/// Elements before `min` and from `max` on are skipped. The bounds apply
/// in that order to the front of the sequence: the first `max` elements
/// are kept, then the first `min` of those are dropped.
///
/// # Examples
///
/// ```
/// use bx_export::Range;
///
/// let r = Range::new(3, 6);
/// assert_eq!(r.apply(0..10).collect::<Vec<_>>(), [3, 4, 5]);
/// assert_eq!(Range::ALL.apply("ab".chars()).count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    min: usize,
    max: usize,
}

impl Range {
    /// Every element.
    pub const ALL: Self = Self::new(0, usize::MAX);

    #[inline]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Only the element at `index`.
    #[inline]
    pub const fn single(index: usize) -> Self {
        Self::new(index, index.saturating_add(1))
    }

    #[inline]
    pub const fn min(&self) -> usize {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> usize {
        self.max
    }

    #[inline]
    pub const fn is_all(&self) -> bool {
        self.min == 0 && self.max == usize::MAX
    }

    /// Restricts `items` to this range.
    #[inline]
    pub fn apply<I: Iterator>(self, items: I) -> impl Iterator<Item = I::Item> {
        items.take(self.max).skip(self.min)
    }
}

impl Default for Range {
    #[inline]
    fn default() -> Self {
        Self::ALL
    }
}

/// The path-specification form: `{3,6}`, `{,6}`, `{3,}` or `{3}`.
impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.max != usize::MAX && self.max == self.min.saturating_add(1) {
            return write!(f, "{{{}}}", self.min);
        }
        f.write_str("{")?;
        if self.min != 0 {
            write!(f, "{}", self.min)?;
        }
        f.write_str(",")?;
        if self.max != usize::MAX {
            write!(f, "{}", self.max)?;
        }
        f.write_str("}")
    }
}

// -----------------------------------------------------------------------------
// Ranged

/// Attaches a fixed [`Range`] to another pruner.
///
/// Only the range of this pruner changes; the pruners it hands out for
/// nested properties are the base's.
#[derive(Debug, Clone)]
pub struct Ranged<P> {
    base: P,
    range: Range,
}

impl<P: TreePruner> Ranged<P> {
    #[inline]
    pub const fn new(base: P, range: Range) -> Self {
        Self { base, range }
    }
}

impl<P: TreePruner> TreePruner for Ranged<P> {
    #[inline]
    fn accept(&self, node: &dyn Any, property: &Property) -> Option<Box<dyn TreePruner + '_>> {
        self.base.accept(node, property)
    }

    #[inline]
    fn range(&self) -> Range {
        self.range
    }
}
