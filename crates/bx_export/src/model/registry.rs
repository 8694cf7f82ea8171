use alloc::sync::{Arc, Weak};
use std::io;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bx_utils::TypeIdMap;

use crate::error::{NotExportable, Reference};
use crate::info::BeanInfo;
use crate::model::{Model, Property, WriteContext};
use crate::{Bean, DescribeBean, ExportConfig, ExportError, Flavor, TreePruner};

/// A cloneable handle to a cache of [`Model`]s, one per bean type.
///
/// Models are built on first use and never evicted; the set of bean types
/// is fixed at compile time. Concurrent first uses may build the same model
/// twice, in which case the first one inserted wins.
///
/// # Examples
///
/// ```
/// use bx_export::{ModelRegistry, derive::Export};
///
/// #[derive(Export)]
/// #[export(bean)]
/// struct Job {
///     #[export]
///     name: String,
/// }
///
/// let registry = ModelRegistry::new();
/// let a = registry.get_for::<Job>().unwrap();
/// let b = registry.clone().get_for::<Job>().unwrap();
///
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct ModelRegistry {
    internal: Arc<RwLock<TypeIdMap<Arc<Model>>>>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`export_to`](crate::export_to).
    pub fn global() -> &'static ModelRegistry {
        static GLOBAL: OnceLock<ModelRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ModelRegistry::new)
    }

    #[inline]
    pub(crate) fn from_internal(internal: Arc<RwLock<TypeIdMap<Arc<Model>>>>) -> Self {
        Self { internal }
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<RwLock<TypeIdMap<Arc<Model>>>> {
        Arc::downgrade(&self.internal)
    }

    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, TypeIdMap<Arc<Model>>> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, TypeIdMap<Arc<Model>>> {
        self.internal.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the model of the type described by `info`, building it if
    /// needed.
    pub fn get(&self, info: &'static BeanInfo) -> Result<Arc<Model>, NotExportable> {
        if let Some(model) = self.read().get(&info.type_id()) {
            return Ok(Arc::clone(model));
        }
        // Built without the lock held: ancestors are resolved recursively.
        let model = Arc::new(Model::build(info, self)?);
        let mut models = self.write();
        Ok(Arc::clone(models.get_or_insert(info.type_id(), || model)))
    }

    /// Returns the model of `T`.
    #[inline]
    pub fn get_for<T: DescribeBean>(&self) -> Result<Arc<Model>, NotExportable> {
        self.get(T::describe())
    }

    /// Like [`get`](Self::get), naming `property` as the referrer on
    /// failure.
    pub(crate) fn get_referenced(
        &self,
        info: &'static BeanInfo,
        property: &Property,
    ) -> Result<Arc<Model>, NotExportable> {
        self.get(info).map_err(|err| {
            let reference = Reference {
                owner: property.owner().type_path(),
                property: property.name(),
            };
            NotExportable::new(err.type_path(), Some(reference))
        })
    }

    /// Number of cached models.
    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Whether the model of `info` is cached.
    #[inline]
    pub fn contains(&self, info: &BeanInfo) -> bool {
        self.read().contains(&info.type_id())
    }

    /// Writes `bean` to `out` in the flavor of `config`.
    ///
    /// JSONP output is wrapped in a call to the configured callback.
    pub fn export<W: io::Write>(
        &self,
        bean: &dyn Bean,
        pruner: &dyn TreePruner,
        config: &ExportConfig,
        mut out: W,
    ) -> Result<(), ExportError> {
        let model = self.get(bean.bean_info())?;
        let callback = config.callback().filter(|_| config.flavor() == Flavor::Jsonp);

        if let Some(callback) = callback {
            out.write_all(callback.as_bytes())?;
            out.write_all(b"(")?;
        }
        {
            let mut writer = config.flavor().create_data_writer(bean, &mut out, config);
            let cx = WriteContext::new(self, config);
            model.write_root(&cx, bean, pruner, &mut *writer)?;
        }
        if callback.is_some() {
            out.write_all(b")")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl core::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{BeanInfo, ExportedBean, NonGenericBeanInfoCell, ParentInfo, PropertyInfo};
    use crate::{Export, ExportKind, PropertyError, Retrieved};
    use core::any::Any;

    struct Plain;
    struct Marked {
        plain: Plain,
    }

    impl Export for Plain {
        fn export_kind(&self) -> ExportKind<'_> {
            ExportKind::Bean(self)
        }
    }

    impl Export for Marked {
        fn export_kind(&self) -> ExportKind<'_> {
            ExportKind::Bean(self)
        }
    }

    impl DescribeBean for Plain {
        fn describe() -> &'static BeanInfo {
            static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
            CELL.get_or_init(|| BeanInfo::new::<Plain>("Plain"))
        }
    }

    fn get_plain(bean: &dyn Any) -> Result<Retrieved<'_>, PropertyError> {
        let marked = bean
            .downcast_ref::<Marked>()
            .ok_or_else(PropertyError::mismatch::<Marked>)?;
        Ok(Retrieved::Borrowed(&marked.plain))
    }

    fn upcast(bean: &dyn Any) -> Option<&dyn Any> {
        bean.downcast_ref::<Marked>().map(|m| &m.plain as &dyn Any)
    }

    impl DescribeBean for Marked {
        fn describe() -> &'static BeanInfo {
            static CELL: NonGenericBeanInfoCell = NonGenericBeanInfoCell::new();
            CELL.get_or_init(|| {
                BeanInfo::new::<Marked>("Marked")
                    .with_marker(ExportedBean::DEFAULT)
                    .with_property(PropertyInfo::field::<Plain>("plain", get_plain))
                    .with_parent(ParentInfo::new::<Plain>(upcast))
            })
        }
    }

    #[test]
    fn unmarked_types_are_rejected() {
        let registry = ModelRegistry::new();
        let err = registry.get_for::<Plain>().unwrap_err();
        assert!(err.type_path().ends_with("Plain"));
        assert_eq!(err.referenced_by(), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn unmarked_ancestor_is_skipped() {
        let registry = ModelRegistry::new();
        let model = registry.get_for::<Marked>().unwrap();
        assert!(model.super_model().is_none());
        assert!(model.declares("plain"));
        assert!(registry.contains(Marked::describe()));
        assert!(!registry.contains(Plain::describe()));
    }

    #[test]
    fn referenced_failure_names_the_property() {
        let registry = ModelRegistry::new();
        let marked = registry.get_for::<Marked>().unwrap();
        let property = marked.property("plain").unwrap();
        let err = registry.get_referenced(Plain::describe(), property).unwrap_err();
        let reference = err.referenced_by().unwrap();
        assert_eq!(reference.property, "plain");
        assert!(reference.owner.ends_with("Marked"));
    }

    #[test]
    fn concurrent_first_use_builds_one_model() {
        let registry = ModelRegistry::new();
        let models: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| registry.get_for::<Marked>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(models.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.len(), 1);
    }
}
