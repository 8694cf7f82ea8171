use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::any::Any;
use core::str::FromStr;

use crate::error::PathSyntaxError;
use crate::pruner::{Range, TreePruner};
use crate::{PathTree, Property};

/// Keeps exactly the properties named in a [`PathTree`].
///
/// # Examples
///
/// ```
/// use bx_export::{NamedPathPruner, TreePruner};
///
/// let pruner = NamedPathPruner::new("jobs[name]{3,6}").unwrap();
/// assert_eq!(pruner.tree().to_string(), "jobs[name]{3,6}");
/// assert!(pruner.range().is_all());
/// ```
#[derive(Debug, Clone)]
pub struct NamedPathPruner<'t> {
    tree: Cow<'t, PathTree>,
}

impl NamedPathPruner<'static> {
    /// Parses `spec` into an owned tree.
    #[inline]
    pub fn new(spec: &str) -> Result<Self, PathSyntaxError> {
        PathTree::parse(spec).map(Self::from_tree)
    }

    #[inline]
    pub fn from_tree(tree: PathTree) -> Self {
        Self {
            tree: Cow::Owned(tree),
        }
    }
}

impl<'t> NamedPathPruner<'t> {
    /// Prunes with a borrowed tree.
    #[inline]
    pub const fn borrowed(tree: &'t PathTree) -> Self {
        Self {
            tree: Cow::Borrowed(tree),
        }
    }

    #[inline]
    pub fn tree(&self) -> &PathTree {
        &self.tree
    }
}

impl FromStr for NamedPathPruner<'static> {
    type Err = PathSyntaxError;

    #[inline]
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        Self::new(spec)
    }
}

impl TreePruner for NamedPathPruner<'_> {
    #[inline]
    fn accept(&self, _: &dyn Any, property: &Property) -> Option<Box<dyn TreePruner + '_>> {
        let child = self.tree.child(property.name())?;
        Some(Box::new(NamedPathPruner::borrowed(child)))
    }

    #[inline]
    fn range(&self) -> Range {
        self.tree.range()
    }
}
