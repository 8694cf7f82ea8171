use alloc::borrow::Cow;
use alloc::string::{String, ToString};

use crate::{Export, ExportKind, Primitive};

// -----------------------------------------------------------------------------
// Text

impl Export for str {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        ExportKind::Text(Cow::Borrowed(self))
    }
}

impl Export for String {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        ExportKind::Text(Cow::Borrowed(self.as_str()))
    }
}

impl Export for Cow<'_, str> {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        ExportKind::Text(Cow::Borrowed(self.as_ref()))
    }
}

// Quoted, so every flavor stays parseable.
impl Export for char {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        ExportKind::Text(Cow::Owned(self.to_string()))
    }
}

// -----------------------------------------------------------------------------
// Primitive

macro_rules! impl_primitive {
    ($variant:ident as $repr:ty: $($ty:ty),+ $(,)?) => {
        $(
            impl Export for $ty {
                #[inline]
                #[allow(clippy::unnecessary_cast, reason = "widening by macro")]
                fn export_kind(&self) -> ExportKind<'_> {
                    ExportKind::Primitive(Primitive::$variant(*self as $repr))
                }
            }
        )+
    };
}

impl_primitive!(Int as i128: i8, i16, i32, i64, i128, isize);
impl_primitive!(UInt as u128: u8, u16, u32, u64, u128, usize);
impl_primitive!(F32 as f32: f32);
impl_primitive!(F64 as f64: f64);
impl_primitive!(Bool as bool: bool);

impl Export for () {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        ExportKind::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert!(matches!(
            (-4_i16).export_kind(),
            ExportKind::Primitive(Primitive::Int(-4))
        ));
        assert!(matches!(
            9_usize.export_kind(),
            ExportKind::Primitive(Primitive::UInt(9))
        ));
        assert!(matches!(
            true.export_kind(),
            ExportKind::Primitive(Primitive::Bool(true))
        ));
        assert!(matches!('c'.export_kind(), ExportKind::Text(t) if t == "c"));
        assert!(matches!(().export_kind(), ExportKind::Null));
    }
}
