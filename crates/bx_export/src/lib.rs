//! Export of annotated object graphs to JSON, JSONP, Python, Ruby and XML.
//!
//! A type opts in with `#[derive(Export)]` and `#[export(bean)]`; its
//! annotated fields (and the accessors of an `#[export_accessors]` block)
//! become properties. A [`ModelRegistry`] caches one [`Model`] per bean
//! type, and a [`TreePruner`] decides which properties are written while
//! the model walks the graph.
//!
//! ```
//! use bx_export::{ByDepth, ExportConfig, derive::Export, export_to_string};
//!
//! #[derive(Export)]
//! #[export(bean)]
//! struct Job {
//!     #[export]
//!     name: String,
//!     #[export(visibility = 2)]
//!     tags: Vec<&'static str>,
//! }
//!
//! let job = Job { name: "build".into(), tags: vec!["ci"] };
//! let config = ExportConfig::default();
//!
//! let all = export_to_string(&job, &ByDepth::new(1), &config).unwrap();
//! assert_eq!(all, r#"{"name":"build","tags":["ci"]}"#);
//!
//! // One level deeper, only visibility 2 and above remains.
//! let deep = export_to_string(&job, &ByDepth::new(2), &config).unwrap();
//! assert_eq!(deep, r#"{"tags":["ci"]}"#);
//! ```
//!
//! ## Crate features
//!
//! - `chrono`: `chrono::DateTime` and `NaiveDateTime` export as dates.
//! - `url`: `url::Url` exports as text.

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names the crate `bx_export`, which must also resolve
// inside the crate itself and in its doc tests.
extern crate self as bx_export;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bean;
mod config;
mod export;
mod flavor;
mod intercept;
mod path;
mod value;

pub mod error;
pub mod impls;
pub mod info;
pub mod model;
pub mod pruner;
pub mod writer;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use bean::{Bean, DescribeBean};
pub use config::{ClassAttribute, ClassPolicy, ExportConfig, ExportConfigBuilder};
pub use error::{
    Expected, ExportError, NotExportable, PathSyntaxError, PropertyError, Reference, UnknownFlavor,
};
pub use export::{export_to, export_to_string};
pub use flavor::Flavor;
pub use intercept::{DefaultInterceptor, ExportInterceptor, Intercepted};
pub use model::{Model, ModelRegistry, Property};
pub use path::PathTree;
pub use pruner::{
    ByDepth, ExcludeDeclared, ExcludeNames, NamedPathPruner, Range, Ranged, TreePruner,
};
pub use value::{Export, ExportKind, Primitive, Retrieved};
pub use writer::{
    CLASS_PROPERTY_NAME, DataWriter, EventBuffer, JsonDataWriter, JsonSyntax, XmlDataWriter,
};

pub use bx_export_derive as derive;
pub use bx_export_derive::export_accessors;
