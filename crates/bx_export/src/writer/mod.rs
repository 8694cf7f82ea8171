//! Streaming output.
//!
//! A [`DataWriter`] receives a flat stream of structural events and turns it
//! into text. [`JsonDataWriter`] covers the JSON, JSONP, Python and Ruby
//! flavors through a [`JsonSyntax`] table; [`XmlDataWriter`] produces
//! element markup. [`EventBuffer`] records events for later replay.

use core::any::TypeId;
use std::io;

use crate::info::BeanInfo;
use crate::{ExportConfig, Primitive};

mod buffer;
mod json;
mod xml;

pub use buffer::EventBuffer;
pub use json::{JsonDataWriter, JsonSyntax};
pub use xml::XmlDataWriter;

/// Name of the member or attribute carrying the runtime type of a bean.
pub const CLASS_PROPERTY_NAME: &str = "_class";

/// Receiver of export events.
///
/// Within an object, every value is preceded by [`name`](Self::name);
/// within an array it is not. [`type_hint`](Self::type_hint) comes right
/// before the [`start_object`](Self::start_object) of a bean.
pub trait DataWriter {
    fn name(&mut self, name: &str) -> io::Result<()>;

    /// Writes text, escaped as the flavor requires.
    fn value(&mut self, value: &str) -> io::Result<()>;

    /// Writes a number or boolean unquoted.
    fn value_primitive(&mut self, value: Primitive) -> io::Result<()>;

    fn value_null(&mut self) -> io::Result<()>;

    fn start_array(&mut self) -> io::Result<()>;

    fn end_array(&mut self) -> io::Result<()>;

    fn start_object(&mut self) -> io::Result<()>;

    fn end_object(&mut self) -> io::Result<()>;

    /// Announces the runtime type of the bean about to be opened, and the
    /// type its slot was declared with.
    fn type_hint(&mut self, expected: Option<TypeId>, actual: &'static BeanInfo) -> io::Result<()>;

    fn export_config(&self) -> &ExportConfig;
}

impl<D: DataWriter + ?Sized> DataWriter for &mut D {
    #[inline]
    fn name(&mut self, name: &str) -> io::Result<()> {
        (**self).name(name)
    }

    #[inline]
    fn value(&mut self, value: &str) -> io::Result<()> {
        (**self).value(value)
    }

    #[inline]
    fn value_primitive(&mut self, value: Primitive) -> io::Result<()> {
        (**self).value_primitive(value)
    }

    #[inline]
    fn value_null(&mut self) -> io::Result<()> {
        (**self).value_null()
    }

    #[inline]
    fn start_array(&mut self) -> io::Result<()> {
        (**self).start_array()
    }

    #[inline]
    fn end_array(&mut self) -> io::Result<()> {
        (**self).end_array()
    }

    #[inline]
    fn start_object(&mut self) -> io::Result<()> {
        (**self).start_object()
    }

    #[inline]
    fn end_object(&mut self) -> io::Result<()> {
        (**self).end_object()
    }

    #[inline]
    fn type_hint(&mut self, expected: Option<TypeId>, actual: &'static BeanInfo) -> io::Result<()> {
        (**self).type_hint(expected, actual)
    }

    #[inline]
    fn export_config(&self) -> &ExportConfig {
        (**self).export_config()
    }
}
