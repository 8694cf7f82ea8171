use core::any::Any;

use crate::{ExportConfig, ExportError, Property, Retrieved};

/// What an [`ExportInterceptor`] decided for one property.
pub enum Intercepted<'a> {
    /// Write this value.
    Value(Retrieved<'a>),
    /// Leave the property out, name included.
    Skip,
}

/// Hook around property retrieval.
///
/// Consulted for every property the pruner accepted, before its name is
/// written. Errors are handled like getter failures: a
/// [`PropertyRetrieval`](ExportError::PropertyRetrieval) error becomes
/// `null` under [`ExportConfig::skip_if_fail`], anything else aborts the
/// export.
///
/// # Examples
///
/// ```
/// use core::any::Any;
/// use bx_export::{ExportConfig, ExportError, ExportInterceptor, Intercepted, Property};
///
/// /// Hides every property called `password`.
/// struct HidePasswords;
///
/// impl ExportInterceptor for HidePasswords {
///     fn get_value<'a>(
///         &self,
///         property: &Property,
///         bean: &'a dyn Any,
///         _: &ExportConfig,
///     ) -> Result<Intercepted<'a>, ExportError> {
///         if property.name() == "password" {
///             return Ok(Intercepted::Skip);
///         }
///         property.get_value(bean).map(Intercepted::Value)
///     }
/// }
///
/// let config = ExportConfig::builder().with_interceptor(HidePasswords).build();
/// ```
pub trait ExportInterceptor: Send + Sync {
    fn get_value<'a>(
        &self,
        property: &Property,
        bean: &'a dyn Any,
        config: &ExportConfig,
    ) -> Result<Intercepted<'a>, ExportError>;
}

/// Calls the property getter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInterceptor;

impl ExportInterceptor for DefaultInterceptor {
    #[inline]
    fn get_value<'a>(
        &self,
        property: &Property,
        bean: &'a dyn Any,
        _: &ExportConfig,
    ) -> Result<Intercepted<'a>, ExportError> {
        property.get_value(bean).map(Intercepted::Value)
    }
}
