//! Items used by code generated with `#[derive(Export)]`.
//!
//! Not public API.

use alloc::borrow::Cow;
use core::any::Any;

use crate::{ExportKind, PropertyError};

/// Downcasts the bean handed to a generated getter.
#[inline]
pub fn downcast_bean<T: Any>(bean: &dyn Any) -> Result<&T, PropertyError> {
    bean.downcast_ref::<T>().ok_or_else(PropertyError::mismatch::<T>)
}

/// The kind of a fieldless enum variant exported under `name`.
#[inline]
pub fn enum_name<'a>(name: &'static str) -> ExportKind<'a> {
    ExportKind::Enum(Cow::Borrowed(name))
}
