use core::any::Any;

use crate::Export;
use crate::info::BeanInfo;

/// A type with a static export description.
///
/// Implemented by `#[derive(Export)]` on structs; every implementor is a
/// [`Bean`].
pub trait DescribeBean: Export + Sized + 'static {
    /// The description shared by all values of this type.
    fn describe() -> &'static BeanInfo;
}

/// An exportable object, usable behind `dyn`.
///
/// Bean traits of the application usually extend it so that a
/// `Box<dyn Shape>` can be written through the model of whatever concrete
/// type it holds:
///
/// ```
/// use bx_export::{Bean, derive::Export};
///
/// trait Shape: Bean {}
///
/// #[derive(Export)]
/// #[export(bean)]
/// struct Square {
///     #[export]
///     side: u32,
/// }
///
/// impl Shape for Square {}
///
/// let shape: Box<dyn Shape> = Box::new(Square { side: 2 });
/// assert_eq!(shape.bean_info().type_name(), "Square");
/// ```
pub trait Bean: Export + 'static {
    /// The description of the concrete type.
    fn bean_info(&self) -> &'static BeanInfo;

    /// Upcast to `&dyn Any` for the generated getters.
    fn as_any(&self) -> &dyn Any;
}

impl<T: DescribeBean> Bean for T {
    #[inline]
    fn bean_info(&self) -> &'static BeanInfo {
        T::describe()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}
