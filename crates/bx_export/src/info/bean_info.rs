use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::DescribeBean;
use crate::info::PropertyInfo;

// -----------------------------------------------------------------------------
// ExportedBean

/// The class-level marker, written `#[export(bean)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportedBean {
    default_visibility: i32,
}

impl ExportedBean {
    /// `#[export(bean)]`: members without an explicit visibility get 1.
    pub const DEFAULT: Self = Self::new(1);

    /// `#[export(bean(default_visibility = N))]`.
    #[inline]
    pub const fn new(default_visibility: i32) -> Self {
        Self { default_visibility }
    }

    #[inline]
    pub const fn default_visibility(&self) -> i32 {
        self.default_visibility
    }
}

impl Default for ExportedBean {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

// -----------------------------------------------------------------------------
// ParentInfo

/// Projects a bean onto its embedded ancestor part.
pub type Upcast = fn(&dyn Any) -> Option<&dyn Any>;

/// Link from a bean to the ancestor embedded in its `#[export(extends)]`
/// field.
#[derive(Clone, Copy)]
pub struct ParentInfo {
    describe: fn() -> &'static BeanInfo,
    upcast: Upcast,
}

impl ParentInfo {
    /// The ancestor is a `B`, reached from the child through `upcast`.
    #[inline]
    pub fn new<B: DescribeBean>(upcast: Upcast) -> Self {
        Self {
            describe: B::describe,
            upcast,
        }
    }

    /// Description of the ancestor type.
    #[inline]
    pub fn info(&self) -> &'static BeanInfo {
        (self.describe)()
    }

    /// Borrows the ancestor part of `bean`, or `None` if `bean` is not of
    /// the child type.
    #[inline]
    pub fn upcast<'a>(&self, bean: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.upcast)(bean)
    }
}

impl fmt::Debug for ParentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParentInfo")
            .field(&self.info().type_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Accessors

/// A method marked `#[export]` that takes arguments besides `&self`.
///
/// Such methods are never exported; building the model warns about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedAccessor {
    name: &'static str,
    arity: usize,
}

impl RejectedAccessor {
    #[inline]
    pub const fn new(name: &'static str, arity: usize) -> Self {
        Self { name, arity }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of arguments after the receiver.
    #[inline]
    pub const fn arity(&self) -> usize {
        self.arity
    }
}

/// The accessor properties of one `#[export_accessors]` impl block.
#[derive(Debug, Clone, Default)]
pub struct AccessorSet {
    properties: Vec<PropertyInfo>,
    rejected: Vec<RejectedAccessor>,
}

impl AccessorSet {
    #[inline]
    pub const fn new() -> Self {
        Self {
            properties: Vec::new(),
            rejected: Vec::new(),
        }
    }

    #[inline]
    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    #[inline]
    pub fn with_rejected(mut self, rejected: RejectedAccessor) -> Self {
        self.rejected.push(rejected);
        self
    }
}

// -----------------------------------------------------------------------------
// BeanInfo

/// Description of an exported type, generated by `#[derive(Export)]`.
///
/// Holds only what the type declares itself; inherited members are reached
/// through [`parent`](Self::parent).
///
/// # Examples
///
/// ```
/// use bx_export::{derive::Export, DescribeBean};
///
/// #[derive(Export)]
/// #[export(bean(default_visibility = 2))]
/// struct Point {
///     /// Horizontal.
///     #[export]
///     x: i32,
///     #[export(name = "ordinate")]
///     y: i32,
/// }
///
/// let info = Point::describe();
/// assert_eq!(info.type_name(), "Point");
/// assert_eq!(info.marker().unwrap().default_visibility(), 2);
///
/// let names: Vec<_> = info.properties().iter().map(|p| p.name()).collect();
/// assert_eq!(names, ["x", "ordinate"]);
/// assert_eq!(info.properties()[0].docs(), Some("Horizontal."));
/// ```
#[derive(Clone)]
pub struct BeanInfo {
    type_id: TypeId,
    type_path: &'static str,
    type_name: &'static str,
    marker: Option<ExportedBean>,
    properties: Vec<PropertyInfo>,
    rejected: Vec<RejectedAccessor>,
    parent: Option<ParentInfo>,
    docs: Option<&'static str>,
}

impl BeanInfo {
    /// Describes `T`, written as `type_name` where a short name is wanted.
    pub fn new<T: Any>(type_name: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            type_name,
            marker: None,
            properties: Vec::new(),
            rejected: Vec::new(),
            parent: None,
            docs: None,
        }
    }

    #[inline]
    pub fn with_marker(self, marker: ExportedBean) -> Self {
        Self {
            marker: Some(marker),
            ..self
        }
    }

    #[inline]
    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    /// Appends the properties and rejected methods of an accessor block.
    pub fn with_accessors(mut self, accessors: AccessorSet) -> Self {
        self.properties.extend(accessors.properties);
        self.rejected.extend(accessors.rejected);
        self
    }

    #[inline]
    pub fn with_parent(self, parent: ParentInfo) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    /// Replaces docs (overwrite, do not merge).
    #[inline]
    pub fn with_docs(self, docs: Option<&'static str>) -> Self {
        Self { docs, ..self }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full path, e.g. `app::model::Job<u8>`.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Short name, e.g. `Job`.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The marker declared on this type itself.
    #[inline]
    pub const fn marker(&self) -> Option<ExportedBean> {
        self.marker
    }

    /// The marker of this type or, failing that, of the nearest ancestor.
    pub fn effective_marker(&self) -> Option<ExportedBean> {
        self.marker
            .or_else(|| self.parent.and_then(|parent| parent.info().effective_marker()))
    }

    /// Properties declared by this type, in declaration order.
    #[inline]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    #[inline]
    pub fn rejected_accessors(&self) -> &[RejectedAccessor] {
        &self.rejected
    }

    #[inline]
    pub const fn parent(&self) -> Option<ParentInfo> {
        self.parent
    }

    #[inline]
    pub const fn docs(&self) -> Option<&'static str> {
        self.docs
    }

    /// Check if the described type is `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for BeanInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanInfo")
            .field("type_path", &self.type_path)
            .field("marker", &self.marker)
            .field("properties", &self.properties)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::NonGenericBeanInfoCell;
    use crate::{Export, ExportKind, PropertyError, Retrieved};

    struct Base;
    struct Child {
        base: Base,
    }

    impl Export for Base {
        fn export_kind(&self) -> ExportKind<'_> {
            ExportKind::Bean(self)
        }
    }

    impl DescribeBean for Base {
        fn describe() -> &'static BeanInfo {
            static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
            CELL.get_or_init(|| BeanInfo::new::<Base>("Base").with_marker(ExportedBean::new(3)))
        }
    }

    fn upcast(bean: &dyn Any) -> Option<&dyn Any> {
        bean.downcast_ref::<Child>().map(|child| &child.base as &dyn Any)
    }

    fn nothing(_: &dyn Any) -> Result<Retrieved<'_>, PropertyError> {
        Ok(Retrieved::owned(()))
    }

    #[test]
    fn marker_is_inherited() {
        let child = BeanInfo::new::<Child>("Child").with_parent(ParentInfo::new::<Base>(upcast));
        assert_eq!(child.marker(), None);
        assert_eq!(child.effective_marker(), Some(ExportedBean::new(3)));
        assert_eq!(BeanInfo::new::<Base>("Base").effective_marker(), None);
    }

    #[test]
    fn upcast_reaches_embedded_part() {
        let parent = ParentInfo::new::<Base>(upcast);
        let child = Child { base: Base };
        let base = parent.upcast(&child).unwrap();
        assert!(core::ptr::eq(base.downcast_ref::<Base>().unwrap(), &child.base));
        assert!(parent.upcast(&Base).is_none());
        assert!(parent.info().is::<Base>());
    }

    #[test]
    fn accessors_are_appended() {
        let info = BeanInfo::new::<Child>("Child")
            .with_property(PropertyInfo::field::<Base>("base", nothing))
            .with_accessors(
                AccessorSet::new()
                    .with_property(PropertyInfo::accessor("size", nothing))
                    .with_rejected(RejectedAccessor::new("lookup", 1)),
            );
        let names: Vec<_> = info.properties().iter().map(PropertyInfo::name).collect();
        assert_eq!(names, ["base", "size"]);
        assert_eq!(info.rejected_accessors(), [RejectedAccessor::new("lookup", 1)]);
        assert!(info.type_path().ends_with("Child"));
    }
}
