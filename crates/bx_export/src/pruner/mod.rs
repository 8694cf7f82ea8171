//! Strategies deciding which properties of an object graph get written.
//!
//! A [`TreePruner`] is asked once per (object, property) pair. Rejecting a
//! property omits it entirely, name included; accepting it yields the
//! pruner that applies to the property's value.
//!
//! - [`ByDepth`]: visibility against nesting depth.
//! - [`NamedPathPruner`]: an explicit [`PathTree`](crate::PathTree).
//! - [`ExcludeDeclared`] and [`ExcludeNames`]: suppress names claimed
//!   elsewhere.
//! - [`Ranged`]: a fixed element range on top of another pruner.

use alloc::boxed::Box;
use core::any::Any;

use crate::Property;

mod depth;
mod filter;
mod named;
mod range;

pub use depth::ByDepth;
pub use filter::{ExcludeDeclared, ExcludeNames};
pub use named::NamedPathPruner;
pub use range::{Range, Ranged};

/// Decides, per property, whether to descend and how.
pub trait TreePruner {
    /// Returns the pruner for the value of `property` on `node`, or `None`
    /// to leave the property out.
    fn accept(&self, node: &dyn Any, property: &Property) -> Option<Box<dyn TreePruner + '_>>;

    /// The elements written when the value being pruned is a sequence.
    #[inline]
    fn range(&self) -> Range {
        Range::ALL
    }
}

impl<P: TreePruner + ?Sized> TreePruner for &P {
    #[inline]
    fn accept(&self, node: &dyn Any, property: &Property) -> Option<Box<dyn TreePruner + '_>> {
        (**self).accept(node, property)
    }

    #[inline]
    fn range(&self) -> Range {
        (**self).range()
    }
}

impl<P: TreePruner + ?Sized> TreePruner for Box<P> {
    #[inline]
    fn accept(&self, node: &dyn Any, property: &Property) -> Option<Box<dyn TreePruner + '_>> {
        (**self).accept(node, property)
    }

    #[inline]
    fn range(&self) -> Range {
        (**self).range()
    }
}
