//! Compile-time descriptions of exported beans.
//!
//! `#[derive(Export)]` produces one [`BeanInfo`] per type: the class-level
//! [`ExportedBean`] marker, the [`PropertyInfo`] of every exported member and
//! an optional [`ParentInfo`] link to the embedded ancestor. A
//! [`Model`](crate::Model) is built from this description the first time the
//! type is exported.

mod bean_info;
mod cell;
mod property_info;

pub use bean_info::{AccessorSet, BeanInfo, ExportedBean, ParentInfo, RejectedAccessor, Upcast};
pub use cell::{GenericBeanInfoCell, NonGenericBeanInfoCell};
pub use property_info::{Getter, PropertyInfo, PropertyKind, VerboseMap};
