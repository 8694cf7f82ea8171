use alloc::string::String;
use alloc::vec::Vec;
use std::io;

use crate::{Bean, ExportConfig, ExportError, ModelRegistry, TreePruner};

/// Writes `bean` to `out` through the [global](ModelRegistry::global)
/// registry, in the flavor chosen by `config`.
///
/// # Examples
///
/// ```
/// use bx_export::{ExportConfig, NamedPathPruner, derive::Export, export_to};
///
/// #[derive(Export)]
/// #[export(bean)]
/// struct Point {
///     #[export]
///     x: i32,
///     #[export]
///     y: String,
/// }
///
/// let point = Point { x: 1, y: "a".into() };
/// let pruner = NamedPathPruner::new("x").unwrap();
///
/// let mut out = Vec::new();
/// export_to(&point, &pruner, &ExportConfig::default(), &mut out).unwrap();
/// assert_eq!(out, br#"{"x":1}"#);
/// ```
#[inline]
pub fn export_to<W: io::Write>(
    bean: &dyn Bean,
    pruner: &dyn TreePruner,
    config: &ExportConfig,
    out: W,
) -> Result<(), ExportError> {
    ModelRegistry::global().export(bean, pruner, config, out)
}

/// Like [`export_to`], collecting the output.
///
/// ```
/// use bx_export::{ByDepth, ExportConfig, Flavor, derive::Export, export_to_string};
///
/// #[derive(Export)]
/// #[export(bean)]
/// struct Flag {
///     #[export]
///     on: bool,
///     #[export]
///     label: Option<String>,
/// }
///
/// let config = ExportConfig::builder().with_flavor(Flavor::Python).build();
/// let text = export_to_string(&Flag { on: true, label: None }, &ByDepth::new(1), &config).unwrap();
/// assert_eq!(text, r#"{"label":None,"on":True}"#);
/// ```
pub fn export_to_string(
    bean: &dyn Bean,
    pruner: &dyn TreePruner,
    config: &ExportConfig,
) -> Result<String, ExportError> {
    let mut out = Vec::new();
    export_to(bean, pruner, config, &mut out)?;
    String::from_utf8(out).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
}
