//! Runtime classification of exported values.
//!
//! Every value reachable from an exported bean implements [`Export`], which
//! reports an [`ExportKind`]. The driver matches on the kind in declaration
//! order; that order is significant, so fieldless enums and dates never fall
//! through to the nested-bean arm.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use core::ops::Deref;

use crate::Bean;

// -----------------------------------------------------------------------------
// Export

/// A value that can appear in an export.
///
/// Implemented for strings, numbers, `bool`, collections, maps, dates,
/// transparent wrappers, and (through `#[derive(Export)]`) beans, fieldless
/// enums and custom-exported types.
///
/// # Examples
///
/// ```
/// use bx_export::{Export, ExportKind};
///
/// assert!(matches!(7_u8.export_kind(), ExportKind::Primitive(_)));
/// assert!(matches!("seven".export_kind(), ExportKind::Text(_)));
/// assert!(matches!(None::<u8>.export_kind(), ExportKind::Null));
/// ```
pub trait Export {
    /// Classify this value.
    fn export_kind(&self) -> ExportKind<'_>;

    /// The bean type a slot holding this value is statically declared as.
    ///
    /// `None` means "no declared type", which the `IfNeeded` class-attribute
    /// policy treats as differing from any runtime type.
    #[inline]
    fn declared_type(&self) -> Option<TypeId> {
        None
    }
}

// -----------------------------------------------------------------------------
// ExportKind

/// The classification of one exported value.
pub enum ExportKind<'a> {
    /// Written as the flavor's null marker.
    Null,
    /// A substitute representation, classified in turn.
    Custom(Retrieved<'a>),
    /// Quoted, escaped text.
    Text(Cow<'a, str>),
    /// Bare numeric or boolean text.
    Primitive(Primitive),
    /// An ordered run of values, each classified independently.
    Sequence(Box<dyn Iterator<Item = Retrieved<'a>> + 'a>),
    /// Key/value pairs. Keys are stringified from their own classification.
    Map(Box<dyn Iterator<Item = (Retrieved<'a>, Retrieved<'a>)> + 'a>),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    /// The symbolic name of an enumeration value.
    Enum(Cow<'a, str>),
    /// A nested bean, written through its model.
    Bean(&'a dyn Bean),
}

impl ExportKind<'_> {
    /// A short lowercase name of the kind, used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            ExportKind::Null => "null",
            ExportKind::Custom(_) => "custom value",
            ExportKind::Text(_) => "text",
            ExportKind::Primitive(_) => "primitive",
            ExportKind::Sequence(_) => "sequence",
            ExportKind::Map(_) => "map",
            ExportKind::Date(_) => "date",
            ExportKind::Enum(_) => "enum",
            ExportKind::Bean(_) => "bean",
        }
    }
}

impl fmt::Debug for ExportKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ExportKind::Primitive(value) => f.debug_tuple("Primitive").field(value).finish(),
            ExportKind::Date(millis) => f.debug_tuple("Date").field(millis).finish(),
            ExportKind::Enum(name) => f.debug_tuple("Enum").field(name).finish(),
            ExportKind::Bean(bean) => f
                .debug_tuple("Bean")
                .field(&bean.bean_info().type_path())
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}

// -----------------------------------------------------------------------------
// Retrieved

/// A value handed out by a getter or a container: either borrowed from the
/// owner or computed on the spot.
pub enum Retrieved<'a> {
    Borrowed(&'a dyn Export),
    Owned(Box<dyn Export + 'a>),
}

impl<'a> Retrieved<'a> {
    /// Box a computed value.
    #[inline]
    pub fn owned<T: Export + 'a>(value: T) -> Self {
        Self::Owned(Box::new(value))
    }
}

impl<'a> Deref for Retrieved<'a> {
    type Target = dyn Export + 'a;

    #[inline]
    fn deref(&self) -> &Self::Target {
        match self {
            Retrieved::Borrowed(value) => *value,
            Retrieved::Owned(value) => &**value,
        }
    }
}

impl<'a, T: Export> From<&'a T> for Retrieved<'a> {
    #[inline]
    fn from(value: &'a T) -> Self {
        Self::Borrowed(value)
    }
}

// -----------------------------------------------------------------------------
// Primitive

/// An unquoted scalar.
///
/// Floats print with a fractional part (`1.0`, not `1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Int(i128),
    UInt(u128),
    F32(f32),
    F64(f64),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Bool(v) => fmt::Display::fmt(v, f),
            Primitive::Int(v) => fmt::Display::fmt(v, f),
            Primitive::UInt(v) => fmt::Display::fmt(v, f),
            Primitive::F32(v) => fmt::Debug::fmt(v, f),
            Primitive::F64(v) => fmt::Debug::fmt(v, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn primitive_text() {
        assert_eq!(Primitive::Int(-3).to_string(), "-3");
        assert_eq!(Primitive::UInt(u128::MAX).to_string(), u128::MAX.to_string());
        assert_eq!(Primitive::F64(1.0).to_string(), "1.0");
        assert_eq!(Primitive::F32(0.5).to_string(), "0.5");
        assert_eq!(Primitive::Bool(false).to_string(), "false");
    }

    #[test]
    fn retrieved_derefs_to_value() {
        let n = 5_i32;
        let borrowed = Retrieved::from(&n);
        let owned = Retrieved::owned(alloc::string::String::from("x"));

        assert!(matches!(borrowed.export_kind(), ExportKind::Primitive(Primitive::Int(5))));
        assert!(matches!(owned.export_kind(), ExportKind::Text(t) if t == "x"));
    }

    #[test]
    fn kind_names() {
        assert_eq!(ExportKind::Null.name(), "null");
        assert_eq!(ExportKind::Date(0).name(), "date");
        assert_eq!(alloc::format!("{:?}", ExportKind::Date(3)), "Date(3)");
    }
}
