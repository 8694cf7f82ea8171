use alloc::boxed::Box;
use core::any::Any;

use crate::Property;
use crate::pruner::TreePruner;

/// Keeps a property while its visibility reaches the current depth.
///
/// A property of visibility `V` is accepted at depth `D` iff `V >= D`.
/// Descending through it moves to depth `D + 1`, unless it is inline.
///
/// # Examples
///
/// ```
/// use bx_export::ByDepth;
///
/// // Depth 0 at the root: visibility-1 properties plus one level below.
/// assert_eq!(ByDepth::from_base_visibility(0).depth(), 1);
/// assert_eq!(ByDepth::from_base_visibility(2).depth(), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByDepth {
    depth: i32,
}

impl ByDepth {
    #[inline]
    pub const fn new(depth: i32) -> Self {
        Self { depth }
    }

    /// The root pruner for a base visibility `B`.
    ///
    /// A property of visibility `V` at nesting level `L` (0 for the root
    /// object's own properties) is then written iff `V + B > L`.
    #[inline]
    pub const fn from_base_visibility(base_visibility: i32) -> Self {
        Self::new(1_i32.saturating_sub(base_visibility))
    }

    #[inline]
    pub const fn depth(&self) -> i32 {
        self.depth
    }
}

impl TreePruner for ByDepth {
    fn accept(&self, _: &dyn Any, property: &Property) -> Option<Box<dyn TreePruner + '_>> {
        if property.visibility() < self.depth {
            return None;
        }
        let depth = if property.is_inline() {
            self.depth
        } else {
            self.depth.saturating_add(1)
        };
        Some(Box::new(ByDepth::new(depth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_visibility_saturates() {
        assert_eq!(ByDepth::from_base_visibility(-4).depth(), 5);
        assert_eq!(ByDepth::from_base_visibility(i32::MIN).depth(), i32::MAX);
        assert_eq!(ByDepth::from_base_visibility(i32::MAX).depth(), 1 - i32::MAX);
    }
}
