use core::any::Any;

use crate::{PropertyError, Retrieved};

/// Reads one property off a bean.
///
/// The bean is passed type-erased; generated getters downcast it and fail
/// with [`PropertyError::Mismatch`] when handed another type.
pub type Getter = for<'a> fn(&'a dyn Any) -> Result<Retrieved<'a>, PropertyError>;

// -----------------------------------------------------------------------------
// PropertyKind

/// How a property reads its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// A struct field, with the path of its declared type.
    Field { value_type: &'static str },
    /// A `&self` method without further arguments.
    Accessor,
}

// -----------------------------------------------------------------------------
// VerboseMap

/// Member names used when a map is written as a list of entry objects.
///
/// Written `verbose_map = "key/value"` on the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerboseMap {
    pub key: &'static str,
    pub value: &'static str,
}

// -----------------------------------------------------------------------------
// PropertyInfo

/// Description of one exported member, as declared on its type.
///
/// # Examples
///
/// ```
/// use core::any::Any;
/// use bx_export::{PropertyError, Retrieved};
/// use bx_export::info::{PropertyInfo, PropertyKind};
///
/// struct Job {
///     name: String,
/// }
///
/// fn get_name(bean: &dyn Any) -> Result<Retrieved<'_>, PropertyError> {
///     let job = bean.downcast_ref::<Job>().ok_or_else(PropertyError::mismatch::<Job>)?;
///     Ok(Retrieved::Borrowed(&job.name))
/// }
///
/// let info = PropertyInfo::field::<String>("name", get_name)
///     .with_name("displayName")
///     .with_visibility(2);
///
/// assert_eq!(info.name(), "displayName");
/// assert_eq!(info.member(), "name");
/// assert!(matches!(info.kind(), PropertyKind::Field { .. }));
/// ```
#[derive(Clone, Copy)]
pub struct PropertyInfo {
    member: &'static str,
    name: &'static str,
    // 0 defers to the class-level default.
    visibility: i32,
    inline: bool,
    verbose_map: Option<VerboseMap>,
    kind: PropertyKind,
    getter: Getter,
    docs: Option<&'static str>,
}

impl PropertyInfo {
    #[inline]
    const fn new(member: &'static str, kind: PropertyKind, getter: Getter) -> Self {
        Self {
            member,
            name: member,
            visibility: 0,
            inline: false,
            verbose_map: None,
            kind,
            getter,
            docs: None,
        }
    }

    /// A field-backed property whose declared type is `F`.
    #[inline]
    pub fn field<F: ?Sized>(member: &'static str, getter: Getter) -> Self {
        let value_type = core::any::type_name::<F>();
        Self::new(member, PropertyKind::Field { value_type }, getter)
    }

    /// An accessor-backed property.
    #[inline]
    pub const fn accessor(member: &'static str, getter: Getter) -> Self {
        Self::new(member, PropertyKind::Accessor, getter)
    }

    /// Overrides the export name.
    #[inline]
    pub const fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }

    /// Overrides the visibility. `0` keeps the class default.
    #[inline]
    pub const fn with_visibility(self, visibility: i32) -> Self {
        Self { visibility, ..self }
    }

    /// Marks the property inline: descending into it costs no depth.
    #[inline]
    pub const fn with_inline(self, inline: bool) -> Self {
        Self { inline, ..self }
    }

    /// Writes map values as `[{key: .., value: ..}]`.
    #[inline]
    pub const fn with_verbose_map(self, key: &'static str, value: &'static str) -> Self {
        Self {
            verbose_map: Some(VerboseMap { key, value }),
            ..self
        }
    }

    /// Replaces docs (overwrite, do not merge).
    #[inline]
    pub const fn with_docs(self, docs: Option<&'static str>) -> Self {
        Self { docs, ..self }
    }

    /// The Rust name of the field or method.
    #[inline]
    pub const fn member(&self) -> &'static str {
        self.member
    }

    /// The name written to the output.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared visibility; `0` means "class default".
    #[inline]
    pub const fn visibility(&self) -> i32 {
        self.visibility
    }

    #[inline]
    pub const fn is_inline(&self) -> bool {
        self.inline
    }

    #[inline]
    pub const fn verbose_map(&self) -> Option<VerboseMap> {
        self.verbose_map
    }

    #[inline]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Doc comment of the member, if any.
    #[inline]
    pub const fn docs(&self) -> Option<&'static str> {
        self.docs
    }

    /// Reads the value off `bean`.
    #[inline]
    pub fn get<'a>(&self, bean: &'a dyn Any) -> Result<Retrieved<'a>, PropertyError> {
        (self.getter)(bean)
    }
}

impl core::fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("member", &self.member)
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("inline", &self.inline)
            .field("verbose_map", &self.verbose_map)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExportKind, Primitive};

    struct Counter {
        hits: u32,
    }

    fn hits(bean: &dyn Any) -> Result<Retrieved<'_>, PropertyError> {
        let counter = bean
            .downcast_ref::<Counter>()
            .ok_or_else(PropertyError::mismatch::<Counter>)?;
        Ok(Retrieved::Borrowed(&counter.hits))
    }

    #[test]
    fn getter_reads_and_checks_type() {
        let info = PropertyInfo::field::<u32>("hits", hits);
        let counter = Counter { hits: 4 };
        let value = info.get(&counter).unwrap();
        assert!(matches!(value.export_kind(), ExportKind::Primitive(Primitive::UInt(4))));

        let err = info.get(&"not a counter").err().unwrap();
        assert!(matches!(err, PropertyError::Mismatch { .. }));
    }

    #[test]
    fn builder_defaults() {
        let info = PropertyInfo::accessor("total", hits);
        assert_eq!(info.name(), "total");
        assert_eq!(info.visibility(), 0);
        assert!(!info.is_inline());
        assert_eq!(info.verbose_map(), None);

        let info = info.with_inline(true).with_verbose_map("k", "v");
        assert!(info.is_inline());
        assert_eq!(info.verbose_map(), Some(VerboseMap { key: "k", value: "v" }));
        assert_eq!(
            PropertyInfo::field::<u32>("hits", hits).kind(),
            PropertyKind::Field { value_type: "u32" }
        );
    }
}
