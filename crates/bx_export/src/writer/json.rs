use alloc::string::String;
use core::any::TypeId;
use core::fmt::Write as _;
use std::io;

use crate::info::BeanInfo;
use crate::writer::{CLASS_PROPERTY_NAME, DataWriter};
use crate::{ExportConfig, Primitive};

// -----------------------------------------------------------------------------
// JsonSyntax

/// The tokens that differ between the JSON-shaped flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSyntax {
    pub null: &'static str,
    pub true_literal: &'static str,
    pub false_literal: &'static str,
    /// Between a member name and its value.
    pub separator: &'static str,
    /// Same, when pretty printing.
    pub pretty_separator: &'static str,
    pub open_object: &'static str,
    pub close_object: &'static str,
}

impl JsonSyntax {
    pub const JSON: Self = Self {
        null: "null",
        true_literal: "true",
        false_literal: "false",
        separator: ":",
        pretty_separator: " : ",
        open_object: "{",
        close_object: "}",
    };

    /// Literals readable by Python's `eval`.
    pub const PYTHON: Self = Self {
        null: "None",
        true_literal: "True",
        false_literal: "False",
        ..Self::JSON
    };

    /// Literals readable by Ruby's `eval`, objects as `OpenStruct`.
    pub const RUBY: Self = Self {
        null: "nil",
        separator: " => ",
        pretty_separator: " => ",
        open_object: "OpenStruct.new({",
        close_object: "})",
        ..Self::JSON
    };
}

// -----------------------------------------------------------------------------
// JsonDataWriter

const INDENT: &str = "                                ";

/// Writer for the JSON-shaped flavors.
///
/// # Examples
///
/// ```
/// use bx_export::{DataWriter, ExportConfig, JsonDataWriter, Primitive};
///
/// let mut writer = JsonDataWriter::new(Vec::new(), &ExportConfig::default());
/// writer.start_object().unwrap();
/// writer.name("tags").unwrap();
/// writer.start_array().unwrap();
/// writer.value("a\"b").unwrap();
/// writer.value_primitive(Primitive::Int(1)).unwrap();
/// writer.end_array().unwrap();
/// writer.end_object().unwrap();
///
/// assert_eq!(writer.into_inner(), br#"{"tags":["a\"b",1]}"#);
/// ```
pub struct JsonDataWriter<W> {
    out: W,
    config: ExportConfig,
    syntax: JsonSyntax,
    need_comma: bool,
    // `None` when not pretty printing.
    indent: Option<usize>,
    class_attr: Option<&'static str>,
}

impl<W: io::Write> JsonDataWriter<W> {
    /// A plain JSON writer.
    #[inline]
    pub fn new(out: W, config: &ExportConfig) -> Self {
        Self::with_syntax(out, config, JsonSyntax::JSON)
    }

    pub fn with_syntax(out: W, config: &ExportConfig, syntax: JsonSyntax) -> Self {
        Self {
            out,
            config: config.clone(),
            syntax,
            need_comma: false,
            indent: config.pretty_print().then_some(0),
            class_attr: None,
        }
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.out
    }

    #[inline]
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn comma(&mut self) -> io::Result<()> {
        if self.need_comma {
            self.write(",")?;
            self.newline()?;
        }
        self.need_comma = true;
        Ok(())
    }

    fn newline(&mut self) -> io::Result<()> {
        let Some(indent) = self.indent else {
            return Ok(());
        };
        self.write("\n")?;
        let mut remaining = indent * 2;
        while remaining > 0 {
            let len = remaining.min(INDENT.len());
            self.write(&INDENT[..len])?;
            remaining -= len;
        }
        Ok(())
    }

    fn data(&mut self, text: &str) -> io::Result<()> {
        self.comma()?;
        self.write(text)
    }

    fn open(&mut self, symbol: &str) -> io::Result<()> {
        self.comma()?;
        self.write(symbol)?;
        self.need_comma = false;
        if let Some(indent) = &mut self.indent {
            *indent += 1;
        }
        self.newline()
    }

    fn close(&mut self, symbol: &str) -> io::Result<()> {
        if let Some(indent) = &mut self.indent {
            *indent = indent.saturating_sub(1);
        }
        self.newline()?;
        self.need_comma = true;
        self.write(symbol)
    }
}

impl<W: io::Write> DataWriter for JsonDataWriter<W> {
    fn name(&mut self, name: &str) -> io::Result<()> {
        self.comma()?;
        let separator = match self.indent {
            Some(_) => self.syntax.pretty_separator,
            None => self.syntax.separator,
        };
        let quoted = quote(name);
        self.write(&quoted)?;
        self.write(separator)?;
        self.need_comma = false;
        Ok(())
    }

    #[inline]
    fn value(&mut self, value: &str) -> io::Result<()> {
        self.data(&quote(value))
    }

    fn value_primitive(&mut self, value: Primitive) -> io::Result<()> {
        match value {
            Primitive::Bool(true) => self.data(self.syntax.true_literal),
            Primitive::Bool(false) => self.data(self.syntax.false_literal),
            other => self.data(&other.to_string()),
        }
    }

    #[inline]
    fn value_null(&mut self) -> io::Result<()> {
        self.data(self.syntax.null)
    }

    #[inline]
    fn start_array(&mut self) -> io::Result<()> {
        self.open("[")
    }

    #[inline]
    fn end_array(&mut self) -> io::Result<()> {
        self.close("]")
    }

    fn start_object(&mut self) -> io::Result<()> {
        self.open(self.syntax.open_object)?;
        if let Some(class_attr) = self.class_attr.take() {
            self.name(CLASS_PROPERTY_NAME)?;
            self.value(class_attr)?;
        }
        Ok(())
    }

    #[inline]
    fn end_object(&mut self) -> io::Result<()> {
        self.close(self.syntax.close_object)
    }

    #[inline]
    fn type_hint(&mut self, expected: Option<TypeId>, actual: &'static BeanInfo) -> io::Result<()> {
        self.class_attr = self.config.class_attribute().print(expected, actual);
        Ok(())
    }

    #[inline]
    fn export_config(&self) -> &ExportConfig {
        &self.config
    }
}

// -----------------------------------------------------------------------------
// Escaping

/// Quotes `text` as a JSON string.
///
/// Every ISO control character (C0, DEL and C1) and every character outside
/// the Basic Multilingual Plane is written as `\uXXXX` escapes, the latter as
/// a surrogate pair.
pub(crate) fn quote(text: &str) -> String {
    let mut buf = String::with_capacity(text.len() + 2);
    buf.push('"');
    for c in text.chars() {
        if c.is_control() || u32::from(c) > 0xFFFF {
            let mut units = [0_u16; 2];
            for unit in c.encode_utf16(&mut units) {
                // Writing to a `String` cannot fail.
                let _ = write!(buf, "\\u{unit:04x}");
            }
            continue;
        }
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            c => buf.push(c),
        }
    }
    buf.push('"');
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn run(config: &ExportConfig, syntax: JsonSyntax, f: impl FnOnce(&mut dyn DataWriter)) -> String {
        let mut writer = JsonDataWriter::with_syntax(Vec::new(), config, syntax);
        f(&mut writer);
        String::from_utf8(writer.into_inner()).unwrap()
    }

    fn sample(w: &mut dyn DataWriter) {
        w.start_object().unwrap();
        w.name("a").unwrap();
        w.value_primitive(Primitive::Int(1)).unwrap();
        w.name("b").unwrap();
        w.start_array().unwrap();
        w.value_primitive(Primitive::Bool(true)).unwrap();
        w.value_null().unwrap();
        w.end_array().unwrap();
        w.name("c").unwrap();
        w.start_object().unwrap();
        w.end_object().unwrap();
        w.end_object().unwrap();
    }

    #[test]
    fn compact_flavors() {
        let config = ExportConfig::default();
        assert_eq!(run(&config, JsonSyntax::JSON, sample), r#"{"a":1,"b":[true,null],"c":{}}"#);
        assert_eq!(run(&config, JsonSyntax::PYTHON, sample), r#"{"a":1,"b":[True,None],"c":{}}"#);
        assert_eq!(
            run(&config, JsonSyntax::RUBY, sample),
            r#"OpenStruct.new({"a" => 1,"b" => [true,nil],"c" => OpenStruct.new({})})"#
        );
    }

    #[test]
    fn pretty_print() {
        let config = ExportConfig::builder().with_pretty_print(true).build();
        let expected = "{\n  \"a\" : 1,\n  \"b\" : [\n    true,\n    null\n  ],\n  \"c\" : {\n    \n  }\n}";
        assert_eq!(run(&config, JsonSyntax::JSON, sample), expected);
    }

    #[test]
    fn escapes() {
        assert_eq!(quote("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quote("\0\n\t\u{7f}\u{85}"), r#""\u0000\u000a\u0009\u007f\u0085""#);
        assert_eq!(quote("é€"), "\"é€\"");
        assert_eq!(quote("😀"), r#""\ud83d\ude00""#);
    }

    #[test]
    fn class_attribute_member() {
        use crate::ClassAttribute;
        use crate::info::BeanInfo;

        struct Job;
        let info: &'static BeanInfo = alloc::boxed::Box::leak(alloc::boxed::Box::new(BeanInfo::new::<Job>("Job")));
        let config = ExportConfig::builder()
            .with_class_attribute(ClassAttribute::ALWAYS.simple())
            .build();
        let out = run(&config, JsonSyntax::JSON, |w| {
            w.type_hint(None, info).unwrap();
            w.start_object().unwrap();
            w.name("x").unwrap();
            w.value("y").unwrap();
            w.end_object().unwrap();
            w.start_object().unwrap();
            w.end_object().unwrap();
        });
        assert_eq!(out, r#"{"_class":"Job","x":"y"},{}"#);
    }
}
