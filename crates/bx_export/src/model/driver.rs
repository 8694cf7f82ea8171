use alloc::string::{String, ToString};
use core::any::TypeId;

use crate::model::{ModelRegistry, Property};
use crate::writer::EventBuffer;
use crate::{Bean, DataWriter, Export, ExportConfig, ExportError, ExportKind, Primitive, TreePruner};

/// State shared by one export call.
pub(crate) struct WriteContext<'c> {
    pub registry: &'c ModelRegistry,
    pub config: &'c ExportConfig,
}

impl<'c> WriteContext<'c> {
    #[inline]
    pub const fn new(registry: &'c ModelRegistry, config: &'c ExportConfig) -> Self {
        Self { registry, config }
    }

    /// Classifies `value` and writes it.
    ///
    /// `skip_if_fail` is set for sequence elements: a nested value that is
    /// not an exported bean then becomes an empty object.
    pub fn write_value(
        &self,
        property: &Property,
        value: &dyn Export,
        pruner: &dyn TreePruner,
        writer: &mut dyn DataWriter,
        skip_if_fail: bool,
    ) -> Result<(), ExportError> {
        match value.export_kind() {
            ExportKind::Null => writer.value_null()?,
            ExportKind::Custom(inner) => {
                return self.write_value(property, &*inner, pruner, writer, skip_if_fail);
            }
            ExportKind::Text(text) => writer.value(&text)?,
            ExportKind::Primitive(primitive) => writer.value_primitive(primitive)?,
            ExportKind::Sequence(items) => {
                writer.start_array()?;
                for item in pruner.range().apply(items) {
                    self.write_element(property, &*item, pruner, writer)?;
                }
                writer.end_array()?;
            }
            ExportKind::Map(entries) => match property.verbose_map() {
                Some(names) => {
                    writer.start_array()?;
                    for (key, value) in entries {
                        writer.start_object()?;
                        writer.name(names.key)?;
                        self.write_value(property, &*key, pruner, writer, false)?;
                        writer.name(names.value)?;
                        self.write_value(property, &*value, pruner, writer, false)?;
                        writer.end_object()?;
                    }
                    writer.end_array()?;
                }
                None => {
                    writer.start_object()?;
                    for (key, value) in entries {
                        writer.name(&map_key(&*key)?)?;
                        self.write_value(property, &*value, pruner, writer, false)?;
                    }
                    writer.end_object()?;
                }
            },
            ExportKind::Date(millis) => writer.value_primitive(Primitive::Int(millis.into()))?,
            ExportKind::Enum(name) => writer.value(&name)?,
            ExportKind::Bean(bean) => {
                let declared = value.declared_type();
                return self.write_bean(property, declared, bean, pruner, writer, skip_if_fail);
            }
        }
        Ok(())
    }

    /// Writes one sequence element, dropping it whole if it fails.
    ///
    /// I/O errors are not tolerated.
    fn write_element(
        &self,
        property: &Property,
        item: &dyn Export,
        pruner: &dyn TreePruner,
        writer: &mut dyn DataWriter,
    ) -> Result<(), ExportError> {
        let mut buffer = EventBuffer::new(self.config);
        match self.write_value(property, item, pruner, &mut buffer, true) {
            Ok(()) => Ok(buffer.replay(writer)?),
            Err(ExportError::Io(err)) => Err(ExportError::Io(err)),
            Err(err) => {
                log::debug!("Dropping an element of {}: {err}", property.name());
                Ok(())
            }
        }
    }

    fn write_bean(
        &self,
        property: &Property,
        declared: Option<TypeId>,
        bean: &dyn Bean,
        pruner: &dyn TreePruner,
        writer: &mut dyn DataWriter,
        skip_if_fail: bool,
    ) -> Result<(), ExportError> {
        let info = bean.bean_info();
        let model = match self.registry.get_referenced(info, property) {
            Ok(model) => Some(model),
            Err(err) if skip_if_fail || self.config.skip_if_fail() => {
                log::debug!("{err}");
                None
            }
            Err(err) => return Err(err.into()),
        };

        writer.type_hint(declared, info)?;
        writer.start_object()?;
        if let Some(model) = model {
            model.write_body(self, bean.as_any(), pruner, writer)?;
        }
        writer.end_object()?;
        Ok(())
    }
}

/// The member name for a map key.
fn map_key(key: &dyn Export) -> Result<String, ExportError> {
    match key.export_kind() {
        ExportKind::Text(text) | ExportKind::Enum(text) => Ok(text.into_owned()),
        ExportKind::Primitive(primitive) => Ok(primitive.to_string()),
        ExportKind::Date(millis) => Ok(millis.to_string()),
        ExportKind::Null => Ok("null".into()),
        ExportKind::Custom(inner) => map_key(&*inner),
        other => Err(ExportError::UnsupportedKey { kind: other.name() }),
    }
}
