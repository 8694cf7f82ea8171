use core::any::Any;
use core::fmt;

use crate::info::{BeanInfo, PropertyInfo, PropertyKind, VerboseMap};
use crate::intercept::Intercepted;
use crate::model::WriteContext;
use crate::{DataWriter, ExportError, Retrieved, TreePruner};

/// One exported member of a bean type, as resolved by its [`Model`].
///
/// [`Model`]: crate::Model
#[derive(Clone, Copy)]
pub struct Property {
    info: &'static PropertyInfo,
    owner: &'static BeanInfo,
    visibility: i32,
}

impl Property {
    /// Resolves a zero visibility to the owning type's default.
    pub(crate) const fn new(
        info: &'static PropertyInfo,
        owner: &'static BeanInfo,
        default_visibility: i32,
    ) -> Self {
        let visibility = match info.visibility() {
            0 => default_visibility,
            v => v,
        };
        Self {
            info,
            owner,
            visibility,
        }
    }

    /// The name written to the output.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.info.name()
    }

    /// Effective visibility, never `0`-means-default.
    #[inline]
    pub const fn visibility(&self) -> i32 {
        self.visibility
    }

    #[inline]
    pub const fn is_inline(&self) -> bool {
        self.info.is_inline()
    }

    #[inline]
    pub const fn verbose_map(&self) -> Option<VerboseMap> {
        self.info.verbose_map()
    }

    #[inline]
    pub const fn kind(&self) -> PropertyKind {
        self.info.kind()
    }

    /// The type declaring this property.
    #[inline]
    pub const fn owner(&self) -> &'static BeanInfo {
        self.owner
    }

    #[inline]
    pub const fn docs(&self) -> Option<&'static str> {
        self.info.docs()
    }

    #[inline]
    pub const fn info(&self) -> &'static PropertyInfo {
        self.info
    }

    /// Reads the value of this property off `bean`.
    pub fn get_value<'a>(&self, bean: &'a dyn Any) -> Result<Retrieved<'a>, ExportError> {
        self.info
            .get(bean)
            .map_err(|source| ExportError::PropertyRetrieval {
                owner: self.owner.type_path(),
                property: self.name(),
                source,
            })
    }

    /// Writes `"name": value` if `pruner` accepts this property.
    pub(crate) fn write_to(
        &self,
        cx: &WriteContext<'_>,
        bean: &dyn Any,
        pruner: &dyn TreePruner,
        writer: &mut dyn DataWriter,
    ) -> Result<(), ExportError> {
        let Some(child) = pruner.accept(bean, self) else {
            return Ok(());
        };

        let value = match cx.config.interceptor().get_value(self, bean, cx.config) {
            Ok(Intercepted::Value(value)) => Some(value),
            Ok(Intercepted::Skip) => return Ok(()),
            Err(err @ ExportError::PropertyRetrieval { .. }) if cx.config.skip_if_fail() => {
                log::debug!("Writing null for {}: {err}", self.name());
                None
            }
            Err(err) => return Err(err),
        };

        writer.name(self.name())?;
        match value {
            Some(value) => cx.write_value(self, &*value, &*child, writer, false),
            None => Ok(writer.value_null()?),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name())
            .field("owner", &self.owner.type_path())
            .field("visibility", &self.visibility)
            .field("inline", &self.is_inline())
            .finish()
    }
}
