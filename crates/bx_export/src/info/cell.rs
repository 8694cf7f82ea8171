//! Static storage for [`BeanInfo`].
//!
//! A non-generic type keeps its description in a [`NonGenericBeanInfoCell`],
//! which is a thin [`OnceLock`].
//!
//! A `static` inside a generic function is shared by every instantiation, so
//! generic types use [`GenericBeanInfoCell`], which maps each concrete type
//! to its leaked description.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use bx_utils::TypeIdMap;

use crate::info::BeanInfo;

/// Storage for the description of a non-generic bean.
///
/// ```
/// use bx_export::info::{BeanInfo, ExportedBean, NonGenericBeanInfoCell};
///
/// struct Empty;
///
/// fn describe() -> &'static BeanInfo {
///     static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
///     CELL.get_or_init(|| BeanInfo::new::<Empty>("Empty").with_marker(ExportedBean::DEFAULT))
/// }
///
/// assert!(core::ptr::eq(describe(), describe()));
/// assert_eq!(describe().type_name(), "Empty");
/// ```
pub struct NonGenericBeanInfoCell(OnceLock<BeanInfo>);

impl NonGenericBeanInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored description, initializing it with `f` first.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> BeanInfo) -> &BeanInfo {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericBeanInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Storage for the descriptions of a generic bean, one per instantiation.
///
/// ```
/// use bx_export::info::{BeanInfo, GenericBeanInfoCell};
///
/// struct Wrapper<T>(T);
///
/// fn describe<T: 'static>() -> &'static BeanInfo {
///     static CELL: GenericBeanInfoCell = GenericBeanInfoCell::new();
///     CELL.get_or_insert::<Wrapper<T>>(|| BeanInfo::new::<Wrapper<T>>("Wrapper"))
/// }
///
/// assert!(describe::<u8>().is::<Wrapper<u8>>());
/// assert!(describe::<u16>().is::<Wrapper<u16>>());
/// ```
pub struct GenericBeanInfoCell(RwLock<TypeIdMap<&'static BeanInfo>>);

impl GenericBeanInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the description stored for `G`, creating it with `f` first.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> BeanInfo) -> &'static BeanInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> BeanInfo,
    ) -> &'static BeanInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static BeanInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: BeanInfo) -> &'static BeanInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl Default for GenericBeanInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
