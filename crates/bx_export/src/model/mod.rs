//! Exportable shapes of bean types and the walk that writes them.
//!
//! A [`Model`] is built once per bean type from its
//! [`BeanInfo`](crate::info::BeanInfo) and cached in a [`ModelRegistry`].
//! It lists the type's own [`Property`] values, sorted by name, and links
//! to the model of the nearest exported ancestor.

mod bean_model;
mod driver;
mod property;
mod registry;

pub use bean_model::Model;
pub use property::Property;
pub use registry::ModelRegistry;

pub(crate) use driver::WriteContext;
