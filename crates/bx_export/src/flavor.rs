use alloc::boxed::Box;
use core::fmt;
use core::str::FromStr;
use std::io;

use crate::error::UnknownFlavor;
use crate::{Bean, DataWriter, ExportConfig, JsonDataWriter, JsonSyntax, XmlDataWriter};

/// A named output syntax.
///
/// # Examples
///
/// ```
/// use bx_export::Flavor;
///
/// let flavor = Flavor::from_name("Python").unwrap();
/// assert_eq!(flavor, Flavor::Python);
/// assert_eq!(flavor.content_type(), "text/x-python;charset=UTF-8");
/// assert_eq!(flavor.to_string(), "python");
/// assert_eq!(Flavor::from_name("yaml"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    Json,
    /// JSON wrapped in a callback call, for script tags.
    Jsonp,
    Python,
    Ruby,
    Xml,
}

impl Flavor {
    pub const ALL: [Flavor; 5] = [
        Flavor::Json,
        Flavor::Jsonp,
        Flavor::Python,
        Flavor::Ruby,
        Flavor::Xml,
    ];

    /// Lowercase name, as used in request paths.
    pub const fn name(self) -> &'static str {
        match self {
            Flavor::Json => "json",
            Flavor::Jsonp => "jsonp",
            Flavor::Python => "python",
            Flavor::Ruby => "ruby",
            Flavor::Xml => "xml",
        }
    }

    /// Looks a flavor up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|flavor| flavor.name().eq_ignore_ascii_case(name))
    }

    /// The MIME type of the output.
    pub const fn content_type(self) -> &'static str {
        match self {
            Flavor::Json => "application/json;charset=UTF-8",
            Flavor::Jsonp => "text/javascript;charset=UTF-8",
            Flavor::Python => "text/x-python;charset=UTF-8",
            Flavor::Ruby => "text/x-ruby;charset=UTF-8",
            Flavor::Xml => "application/xml;charset=UTF-8",
        }
    }

    /// Creates the writer for this flavor.
    ///
    /// `root` is the bean about to be written; the XML flavor names its
    /// root element after it. The JSONP callback is not written here.
    pub fn create_data_writer<'w, W: io::Write + 'w>(
        self,
        root: &dyn Bean,
        out: W,
        config: &ExportConfig,
    ) -> Box<dyn DataWriter + 'w> {
        match self {
            Flavor::Json | Flavor::Jsonp => Box::new(JsonDataWriter::new(out, config)),
            Flavor::Python => Box::new(JsonDataWriter::with_syntax(out, config, JsonSyntax::PYTHON)),
            Flavor::Ruby => Box::new(JsonDataWriter::with_syntax(out, config, JsonSyntax::RUBY)),
            Flavor::Xml => Box::new(XmlDataWriter::new(root, out, config)),
        }
    }
}

impl fmt::Display for Flavor {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Flavor {
    type Err = UnknownFlavor;

    #[inline]
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| UnknownFlavor(name.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for flavor in Flavor::ALL {
            assert_eq!(flavor.name().parse::<Flavor>(), Ok(flavor));
            assert!(flavor.content_type().ends_with(";charset=UTF-8"));
        }
        assert_eq!("XML".parse::<Flavor>(), Ok(Flavor::Xml));
        assert_eq!(
            "toml".parse::<Flavor>().unwrap_err().to_string(),
            "unknown export flavor `toml`"
        );
    }
}
