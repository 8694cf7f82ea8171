//! Code generation, one file per expansion shape.

mod accessors;
mod bean;
mod value;

pub(crate) use accessors::impl_accessors;
pub(crate) use bean::impl_bean;
pub(crate) use value::{impl_custom, impl_enum};
