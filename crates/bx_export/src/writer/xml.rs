use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use std::io;

use crate::info::BeanInfo;
use crate::writer::{CLASS_PROPERTY_NAME, DataWriter};
use crate::{Bean, ExportConfig, Primitive};

/// Writer for element markup.
///
/// Every value becomes an element named after its property; array
/// elements repeat the singular of the property name (`jobs` gives `<job>`),
/// so nested arrays are flattened. `null` writes nothing. The root element
/// is named after the exported type.
///
/// # Examples
///
/// ```
/// use bx_export::{DataWriter, ExportConfig, XmlDataWriter};
///
/// let mut writer = XmlDataWriter::with_root_name("hudson", Vec::new(), &ExportConfig::default());
/// writer.start_object().unwrap();
/// writer.name("jobs").unwrap();
/// writer.start_array().unwrap();
/// writer.value("a & b").unwrap();
/// writer.value("c").unwrap();
/// writer.end_array().unwrap();
/// writer.end_object().unwrap();
///
/// assert_eq!(
///     String::from_utf8(writer.into_inner()).unwrap(),
///     "<hudson><job>a &amp; b</job><job>c</job></hudson>",
/// );
/// ```
pub struct XmlDataWriter<W> {
    out: W,
    config: ExportConfig,
    name: String,
    object_names: Vec<String>,
    array_state: Vec<bool>,
    is_array: bool,
    class_attr: Option<&'static str>,
}

impl<W: io::Write> XmlDataWriter<W> {
    /// The root element is the decapitalized short name of `root`'s type.
    #[inline]
    pub fn new(root: &dyn Bean, out: W, config: &ExportConfig) -> Self {
        Self::with_root_name(decapitalize(root.bean_info().type_name()), out, config)
    }

    pub fn with_root_name(root_name: impl Into<String>, out: W, config: &ExportConfig) -> Self {
        Self {
            out,
            config: config.clone(),
            name: root_name.into(),
            object_names: Vec::new(),
            array_state: Vec::new(),
            is_array: false,
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

    /// The element name for the current value.
    fn adjusted_name(&self) -> String {
        let name = make_xml_name(&self.name);
        if self.is_array {
            to_singular(&name).into()
        } else {
            name
        }
    }
}

impl<W: io::Write> DataWriter for XmlDataWriter<W> {
    #[inline]
    fn name(&mut self, name: &str) -> io::Result<()> {
        self.name.clear();
        self.name.push_str(name);
        Ok(())
    }

    fn value(&mut self, value: &str) -> io::Result<()> {
        let name = self.adjusted_name();
        self.write("<")?;
        self.write(&name)?;
        self.write(">")?;
        self.write(&escape(value))?;
        self.write("</")?;
        self.write(&name)?;
        self.write(">")
    }

    #[inline]
    fn value_primitive(&mut self, value: Primitive) -> io::Result<()> {
        self.value(&value.to_string())
    }

    #[inline]
    fn value_null(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    fn start_array(&mut self) -> io::Result<()> {
        self.is_array = true;
        Ok(())
    }

    #[inline]
    fn end_array(&mut self) -> io::Result<()> {
        self.is_array = false;
        Ok(())
    }

    fn start_object(&mut self) -> io::Result<()> {
        self.object_names.push(self.name.clone());
        let name = self.adjusted_name();
        self.write("<")?;
        self.write(&name)?;
        if let Some(class_attr) = self.class_attr.take() {
            self.write(" ")?;
            self.write(CLASS_PROPERTY_NAME)?;
            self.write("='")?;
            self.write(&escape(class_attr))?;
            self.write("'")?;
        }
        self.write(">")?;
        self.array_state.push(self.is_array);
        self.is_array = false;
        Ok(())
    }

    fn end_object(&mut self) -> io::Result<()> {
        self.name = self.object_names.pop().unwrap_or_default();
        self.is_array = self.array_state.pop().unwrap_or(false);
        let name = self.adjusted_name();
        self.write("</")?;
        self.write(&name)?;
        self.write(">")
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
// Names

/// `Job` becomes `job`; names starting with two capitals stay as they are.
pub(crate) fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_uppercase() => name.into(),
        (Some(first), _) => first
            .to_lowercase()
            .chain(name[first.len_utf8()..].chars())
            .collect(),
        (None, _) => String::new(),
    }
}

/// `entries` becomes `entry`, `jobs` becomes `job`.
pub(crate) fn to_singular(name: &str) -> Cow<'_, str> {
    if let Some(stem) = name.strip_suffix("ies") {
        let mut singular = String::with_capacity(stem.len() + 1);
        singular.push_str(stem);
        singular.push('y');
        return Cow::Owned(singular);
    }
    Cow::Borrowed(name.strip_suffix('s').unwrap_or(name))
}

/// Turns `name` into a valid element name.
///
/// A bad first character is dropped if the second could start a name, and
/// prefixed with `_` otherwise. Other invalid characters are removed.
pub(crate) fn make_xml_name(name: &str) -> String {
    let name = if name.is_empty() { "_" } else { name };
    let mut result = String::with_capacity(name.len() + 1);

    let mut chars = name.chars();
    let rest = match (chars.next(), chars.next()) {
        (Some(first), _) if is_name_start(first) => {
            result.push(first);
            &name[first.len_utf8()..]
        }
        (Some(first), Some(second)) if is_name_start(second) => {
            result.push(second);
            &name[first.len_utf8() + second.len_utf8()..]
        }
        _ => {
            result.push('_');
            name
        }
    };
    result.extend(rest.chars().filter(|&c| is_name_char(c)));
    result
}

/// `NameStartChar` of XML 1.0, fifth edition.
const fn is_name_start(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}'
    )
}

/// `NameChar` of XML 1.0, fifth edition.
const fn is_name_char(c: char) -> bool {
    is_name_start(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

// -----------------------------------------------------------------------------
// Escaping

/// Escapes markup characters and writes control characters as numeric
/// references. Tab, line feed, carriage return and NEL pass through.
pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    let needs_escape = |c: char| {
        matches!(c, '&' | '<' | '>')
            || (c < ' ' && !matches!(c, '\t' | '\n' | '\r'))
            || (('\u{7F}'..='\u{9F}').contains(&c) && c != '\u{85}')
    };
    if !text.contains(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut buf = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            c if needs_escape(c) => {
                buf.push_str("&#");
                buf.push_str(&u32::from(c).to_string());
                buf.push(';');
            }
            c => buf.push(c),
        }
    }
    Cow::Owned(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_names() {
        assert_eq!(to_singular("entries"), "entry");
        assert_eq!(to_singular("jobs"), "job");
        assert_eq!(to_singular("data"), "data");
        assert_eq!(to_singular("ies"), "y");
    }

    #[test]
    fn xml_names() {
        assert_eq!(make_xml_name(""), "_");
        assert_eq!(make_xml_name("name"), "name");
        assert_eq!(make_xml_name("1abc"), "abc");
        assert_eq!(make_xml_name("12"), "_12");
        assert_eq!(make_xml_name("-"), "_-");
        assert_eq!(make_xml_name("a b/c"), "abc");
        assert_eq!(make_xml_name("$x"), "x");
    }

    #[test]
    fn decapitalized() {
        assert_eq!(decapitalize("Hudson"), "hudson");
        assert_eq!(decapitalize("PA"), "PA");
        assert_eq!(decapitalize("URLHolder"), "URLHolder");
        assert_eq!(decapitalize("x"), "x");
        assert_eq!(decapitalize(""), "");
    }

    #[test]
    fn escaped_text() {
        assert!(matches!(escape("plain"), Cow::Borrowed("plain")));
        assert_eq!(escape("<a&b>"), "&lt;a&amp;b&gt;");
        assert_eq!(escape("\0\t\n\r\u{1b}"), "&#0;\t\n\r&#27;");
        assert_eq!(escape("\u{7f}\u{85}\u{9f}"), "&#127;\u{85}&#159;");
    }

    #[test]
    fn nested_arrays_of_objects() {
        let mut w = XmlDataWriter::with_root_name("root", Vec::new(), &ExportConfig::default());
        w.start_object().unwrap();
        w.name("entries").unwrap();
        w.start_array().unwrap();
        w.start_object().unwrap();
        w.name("id").unwrap();
        w.value_primitive(Primitive::Int(7)).unwrap();
        w.name("gone").unwrap();
        w.value_null().unwrap();
        w.end_object().unwrap();
        w.end_array().unwrap();
        w.end_object().unwrap();
        assert_eq!(
            String::from_utf8(w.into_inner()).unwrap(),
            "<root><entry><id>7</id></entry></root>"
        );
    }
}
