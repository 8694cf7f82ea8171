use alloc::boxed::Box;
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use std::sync::RwLock;

use bx_utils::TypeIdMap;
use bx_utils::hash::HashSet;

use crate::error::NotExportable;
use crate::info::{BeanInfo, ParentInfo};
use crate::model::{ModelRegistry, Property, WriteContext};
use crate::pruner::ExcludeDeclared;
use crate::{Bean, ByDepth, DataWriter, ExportError, TreePruner};

/// The exportable shape of one bean type.
///
/// Built from the type's own [`BeanInfo`]; inherited properties live in
/// the [`super_model`](Self::super_model), and a property redeclared here
/// shadows the inherited one.
///
/// # Examples
///
/// ```
/// use bx_export::{ByDepth, ExportConfig, JsonDataWriter, ModelRegistry, derive::Export};
///
/// #[derive(Export)]
/// #[export(bean)]
/// struct Point {
///     #[export]
///     y: &'static str,
///     #[export]
///     x: i32,
/// }
///
/// let registry = ModelRegistry::new();
/// let model = registry.get_for::<Point>().unwrap();
/// let names: Vec<_> = model.properties().iter().map(|p| p.name()).collect();
/// assert_eq!(names, ["x", "y"]);
///
/// let config = ExportConfig::default();
/// let mut writer = JsonDataWriter::new(Vec::new(), &config);
/// model.write_to(&Point { x: 1, y: "a" }, &ByDepth::new(1), &mut writer).unwrap();
/// assert_eq!(writer.into_inner(), br#"{"x":1,"y":"a"}"#);
/// ```
pub struct Model {
    info: &'static BeanInfo,
    default_visibility: i32,
    properties: Box<[Property]>,
    names: HashSet<&'static str>,
    parent: Option<(Arc<Model>, ParentInfo)>,
    registry: Weak<RwLock<TypeIdMap<Arc<Model>>>>,
}

impl Model {
    /// Builds the model of `info`, resolving its ancestors through
    /// `registry`.
    pub(crate) fn build(
        info: &'static BeanInfo,
        registry: &ModelRegistry,
    ) -> Result<Self, NotExportable> {
        let Some(marker) = info.effective_marker() else {
            return Err(NotExportable::new(info.type_path(), None));
        };
        let default_visibility = marker.default_visibility();

        let parent = match info.parent() {
            Some(parent) if parent.info().effective_marker().is_some() => {
                Some((registry.get(parent.info())?, parent))
            }
            _ => None,
        };

        for rejected in info.rejected_accessors() {
            log::warn!(
                "Method {} of {} is annotated #[export] but requires arguments",
                rejected.name(),
                info.type_path(),
            );
        }

        let mut properties: Vec<Property> = info
            .properties()
            .iter()
            .map(|property| Property::new(property, info, default_visibility))
            .collect();
        properties.sort_by_key(Property::name);

        let mut names = HashSet::default();
        properties.retain(|property| {
            let unique = names.insert(property.name());
            if !unique {
                log::warn!(
                    "{} declares the export name `{}` twice; keeping the first",
                    info.type_path(),
                    property.name(),
                );
            }
            unique
        });

        log::trace!(
            "Built export model of {} with {} properties",
            info.type_path(),
            properties.len(),
        );

        Ok(Self {
            info,
            default_visibility,
            properties: properties.into_boxed_slice(),
            names,
            parent,
            registry: registry.downgrade(),
        })
    }

    /// Description of the modeled type.
    #[inline]
    pub const fn info(&self) -> &'static BeanInfo {
        self.info
    }

    /// Visibility of properties declared without one.
    #[inline]
    pub const fn default_visibility(&self) -> i32 {
        self.default_visibility
    }

    /// Own properties, sorted by name.
    #[inline]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Looks an own property up by export name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .binary_search_by(|property| property.name().cmp(name))
            .ok()
            .map(|index| &self.properties[index])
    }

    /// The model of the nearest exported ancestor.
    #[inline]
    pub fn super_model(&self) -> Option<&Arc<Model>> {
        self.parent.as_ref().map(|(model, _)| model)
    }

    /// Whether this type itself declares the export name `name`.
    #[inline]
    pub fn declares(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Writes `bean` as an object, choosing properties with `pruner`.
    ///
    /// Nested beans are resolved through the registry that built this
    /// model.
    pub fn write_to(
        &self,
        bean: &dyn Bean,
        pruner: &dyn TreePruner,
        writer: &mut dyn DataWriter,
    ) -> Result<(), ExportError> {
        let registry = self
            .registry
            .upgrade()
            .map(ModelRegistry::from_internal)
            .unwrap_or_default();
        let config = writer.export_config().clone();
        self.write_root(&WriteContext::new(&registry, &config), bean, pruner, writer)
    }

    /// Writes `bean` keeping properties of visibility `V` at nesting level
    /// `L` iff `V + base_visibility > L`.
    #[inline]
    pub fn write_to_depth(
        &self,
        bean: &dyn Bean,
        base_visibility: i32,
        writer: &mut dyn DataWriter,
    ) -> Result<(), ExportError> {
        self.write_to(bean, &ByDepth::from_base_visibility(base_visibility), writer)
    }

    pub(crate) fn write_root(
        &self,
        cx: &WriteContext<'_>,
        bean: &dyn Bean,
        pruner: &dyn TreePruner,
        writer: &mut dyn DataWriter,
    ) -> Result<(), ExportError> {
        let actual = bean.bean_info();
        if actual.type_id() != self.info.type_id() {
            return Err(ExportError::BeanMismatch {
                expected: self.info.type_path(),
                actual: actual.type_path(),
            });
        }
        writer.type_hint(None, actual)?;
        writer.start_object()?;
        self.write_body(cx, bean.as_any(), pruner, writer)?;
        writer.end_object()?;
        Ok(())
    }

    /// Writes the members of `bean` into the current object: ancestors
    /// first, then own properties.
    pub(crate) fn write_body(
        &self,
        cx: &WriteContext<'_>,
        bean: &dyn Any,
        pruner: &dyn TreePruner,
        writer: &mut dyn DataWriter,
    ) -> Result<(), ExportError> {
        self.write_chain(cx, self.info, bean, pruner, writer)
    }

    fn write_chain(
        &self,
        cx: &WriteContext<'_>,
        concrete: &'static BeanInfo,
        bean: &dyn Any,
        pruner: &dyn TreePruner,
        writer: &mut dyn DataWriter,
    ) -> Result<(), ExportError> {
        match &self.parent {
            Some((model, link)) => {
                let Some(part) = link.upcast(bean) else {
                    return Err(ExportError::BeanMismatch {
                        expected: self.info.type_path(),
                        actual: model.info.type_path(),
                    });
                };
                let pruner = ExcludeDeclared::new(pruner, self);
                model.write_chain(cx, concrete, part, &pruner, writer)?;
            }
            None if cx.config.class_field() => {
                writer.name("class")?;
                writer.value(concrete.type_name())?;
            }
            None => {}
        }

        for property in &self.properties {
            property.write_to(cx, bean, pruner, writer)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("type_path", &self.info.type_path())
            .field("default_visibility", &self.default_visibility)
            .field("properties", &self.properties)
            .field("super_model", &self.super_model())
            .finish()
    }
}
