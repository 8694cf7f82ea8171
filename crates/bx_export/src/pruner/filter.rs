use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;

use bx_utils::hash::HashSet;

use crate::pruner::{Range, TreePruner};
use crate::{Model, Property};

// -----------------------------------------------------------------------------
// ExcludeDeclared

/// Rejects every property whose name is declared by `model`, deferring to
/// `base` otherwise.
///
/// Used while writing the ancestor part of a bean, so that properties
/// redeclared by a descendant are written once, from the descendant.
/// Only the level it is applied to is filtered; nested values are pruned
/// by whatever `base` hands out.
pub struct ExcludeDeclared<'a> {
    base: &'a dyn TreePruner,
    model: &'a Model,
}

impl<'a> ExcludeDeclared<'a> {
    #[inline]
    pub const fn new(base: &'a dyn TreePruner, model: &'a Model) -> Self {
        Self { base, model }
    }
}

impl TreePruner for ExcludeDeclared<'_> {
    #[inline]
    fn accept(&self, node: &dyn Any, property: &Property) -> Option<Box<dyn TreePruner + '_>> {
        if self.model.declares(property.name()) {
            return None;
        }
        self.base.accept(node, property)
    }

    #[inline]
    fn range(&self) -> Range {
        self.base.range()
    }
}

// -----------------------------------------------------------------------------
// ExcludeNames

/// Rejects a fixed set of property names at the level it is applied to.
///
/// # Examples
///
/// ```
/// use bx_export::{ByDepth, ExcludeNames};
///
/// let pruner = ExcludeNames::new(ByDepth::new(1), ["secret", "token"]);
/// assert!(pruner.excludes("token"));
/// assert!(!pruner.excludes("name"));
/// ```
#[derive(Debug, Clone)]
pub struct ExcludeNames<P> {
    base: P,
    names: HashSet<String>,
}

impl<P: TreePruner> ExcludeNames<P> {
    pub fn new<I>(base: P, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            base,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn excludes(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl<P: TreePruner> TreePruner for ExcludeNames<P> {
    #[inline]
    fn accept(&self, node: &dyn Any, property: &Property) -> Option<Box<dyn TreePruner + '_>> {
        if self.excludes(property.name()) {
            return None;
        }
        self.base.accept(node, property)
    }

    #[inline]
    fn range(&self) -> Range {
        self.base.range()
    }
}
