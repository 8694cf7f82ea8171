use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use core::any::TypeId;
use core::mem::size_of;

use crate::{Export, ExportKind};

impl<T: Export> Export for Option<T> {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        match self {
            Some(value) => value.export_kind(),
            None => ExportKind::Null,
        }
    }

    #[inline]
    fn declared_type(&self) -> Option<TypeId> {
        self.as_ref().and_then(Export::declared_type)
    }
}

impl<T: Export + ?Sized> Export for &T {
    #[inline]
    fn export_kind(&self) -> ExportKind<'_> {
        (**self).export_kind()
    }

    #[inline]
    fn declared_type(&self) -> Option<TypeId> {
        (**self).declared_type()
    }
}

/// The declared type of a pointer slot.
///
/// A fat pointer to `T` means `T` is unsized, i.e. a trait object (or a
/// slice): the slot is declared as `T` itself and the runtime bean may be
/// anything implementing it. Thin pointers defer to the pointee.
#[inline]
fn pointee_declared_type<T: Export + ?Sized + 'static>(value: &T) -> Option<TypeId> {
    if size_of::<&T>() == size_of::<&()>() {
        value.declared_type()
    } else {
        Some(TypeId::of::<T>())
    }
}

macro_rules! impl_smart_pointer {
    ($($ptr:ident),+) => {
        $(
            impl<T: Export + ?Sized + 'static> Export for $ptr<T> {
                #[inline]
                fn export_kind(&self) -> ExportKind<'_> {
                    (**self).export_kind()
                }

                #[inline]
                fn declared_type(&self) -> Option<TypeId> {
                    pointee_declared_type::<T>(self)
                }
            }
        )+
    };
}

impl_smart_pointer!(Box, Rc, Arc);

#[cfg(test)]
mod tests {
    use super::*;

    struct Opaque;

    impl Export for Opaque {
        fn export_kind(&self) -> ExportKind<'_> {
            ExportKind::Null
        }

        fn declared_type(&self) -> Option<TypeId> {
            Some(TypeId::of::<Opaque>())
        }
    }

    #[test]
    fn thin_pointers_defer_to_pointee() {
        let boxed = Box::new(Opaque);
        assert_eq!(boxed.declared_type(), Some(TypeId::of::<Opaque>()));
        assert_eq!(Some(Arc::new(Opaque)).declared_type(), Some(TypeId::of::<Opaque>()));
        assert_eq!(None::<Rc<Opaque>>.declared_type(), None);
    }

    #[test]
    fn trait_objects_declare_themselves() {
        let boxed: Box<dyn Export> = Box::new(Opaque);
        assert_eq!(boxed.declared_type(), Some(TypeId::of::<dyn Export>()));
        assert!(matches!(boxed.export_kind(), ExportKind::Null));
    }
}
