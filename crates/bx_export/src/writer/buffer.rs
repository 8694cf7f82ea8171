use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use std::io;

use crate::info::BeanInfo;
use crate::writer::DataWriter;
use crate::{ExportConfig, Primitive};

#[derive(Debug, Clone)]
enum Event {
    Name(String),
    Value(String),
    Primitive(Primitive),
    Null,
    StartArray,
    EndArray,
    StartObject,
    EndObject,
    TypeHint(Option<TypeId>, &'static BeanInfo),
}

/// Records events in memory, to be replayed onto another writer.
///
/// Lets a fragment be dropped whole when writing it fails half way.
///
/// # Examples
///
/// ```
/// use bx_export::{DataWriter, EventBuffer, ExportConfig, JsonDataWriter};
///
/// let config = ExportConfig::default();
/// let mut buffer = EventBuffer::new(&config);
/// buffer.start_array().unwrap();
/// buffer.value("x").unwrap();
/// buffer.end_array().unwrap();
/// assert_eq!(buffer.len(), 3);
///
/// let mut json = JsonDataWriter::new(Vec::new(), &config);
/// buffer.replay(&mut json).unwrap();
/// assert_eq!(json.into_inner(), br#"["x"]"#);
/// ```
#[derive(Debug)]
pub struct EventBuffer<'c> {
    config: &'c ExportConfig,
    events: Vec<Event>,
}

impl<'c> EventBuffer<'c> {
    #[inline]
    pub const fn new(config: &'c ExportConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
        }
    }

    /// Number of recorded events.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sends every recorded event to `target`, in order.
    pub fn replay(self, target: &mut dyn DataWriter) -> io::Result<()> {
        for event in self.events {
            match event {
                Event::Name(name) => target.name(&name)?,
                Event::Value(value) => target.value(&value)?,
                Event::Primitive(value) => target.value_primitive(value)?,
                Event::Null => target.value_null()?,
                Event::StartArray => target.start_array()?,
                Event::EndArray => target.end_array()?,
                Event::StartObject => target.start_object()?,
                Event::EndObject => target.end_object()?,
                Event::TypeHint(expected, actual) => target.type_hint(expected, actual)?,
            }
        }
        Ok(())
    }

    #[inline]
    fn push(&mut self, event: Event) -> io::Result<()> {
        self.events.push(event);
        Ok(())
    }
}

impl DataWriter for EventBuffer<'_> {
    #[inline]
    fn name(&mut self, name: &str) -> io::Result<()> {
        self.push(Event::Name(name.into()))
    }

    #[inline]
    fn value(&mut self, value: &str) -> io::Result<()> {
        self.push(Event::Value(value.into()))
    }

    #[inline]
    fn value_primitive(&mut self, value: Primitive) -> io::Result<()> {
        self.push(Event::Primitive(value))
    }

    #[inline]
    fn value_null(&mut self) -> io::Result<()> {
        self.push(Event::Null)
    }

    #[inline]
    fn start_array(&mut self) -> io::Result<()> {
        self.push(Event::StartArray)
    }

    #[inline]
    fn end_array(&mut self) -> io::Result<()> {
        self.push(Event::EndArray)
    }

    #[inline]
    fn start_object(&mut self) -> io::Result<()> {
        self.push(Event::StartObject)
    }

    #[inline]
    fn end_object(&mut self) -> io::Result<()> {
        self.push(Event::EndObject)
    }

    #[inline]
    fn type_hint(&mut self, expected: Option<TypeId>, actual: &'static BeanInfo) -> io::Result<()> {
        self.push(Event::TypeHint(expected, actual))
    }

    #[inline]
    fn export_config(&self) -> &ExportConfig {
        self.config
    }
}
