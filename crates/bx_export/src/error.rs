use alloc::boxed::Box;
use alloc::string::String;
use core::error::Error;
use core::fmt;
use std::io;

use thiserror::Error;

// -----------------------------------------------------------------------------
// NotExportable

/// The property through which a non-exportable type was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    /// Type path of the bean declaring the property.
    pub owner: &'static str,
    /// Export name of the property.
    pub property: &'static str,
}

/// A model was requested for a type that carries no `#[export(bean)]`
/// marker, neither directly nor through an ancestor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{type_path}` is not an exported bean{}", referenced_suffix(.referenced_by))]
pub struct NotExportable {
    type_path: &'static str,
    referenced_by: Option<Reference>,
}

fn referenced_suffix(reference: &Option<Reference>) -> String {
    match reference {
        Some(r) => alloc::format!(" (referenced by property `{}` of `{}`)", r.property, r.owner),
        None => String::new(),
    }
}

impl NotExportable {
    #[inline]
    pub(crate) const fn new(type_path: &'static str, referenced_by: Option<Reference>) -> Self {
        Self {
            type_path,
            referenced_by,
        }
    }

    /// Type path of the offending type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The property that led to the offending type, if the failure
    /// happened while descending into a nested value.
    #[inline]
    pub const fn referenced_by(&self) -> Option<Reference> {
        self.referenced_by
    }
}

// -----------------------------------------------------------------------------
// PropertyError

/// Failure of a property getter.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PropertyError {
    /// The getter was handed an object of another type.
    #[error("expected a `{expected}`")]
    Mismatch { expected: &'static str },
    /// A fallible accessor returned an error.
    #[error("{0}")]
    Failed(#[source] Box<dyn Error + Send + Sync>),
}

impl PropertyError {
    /// The getter of a `T` property received something else.
    #[inline]
    pub fn mismatch<T: ?Sized>() -> Self {
        Self::Mismatch {
            expected: core::any::type_name::<T>(),
        }
    }

    /// Wrap the error returned by a fallible accessor.
    #[inline]
    pub fn failed(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Failed(source.into())
    }
}

// -----------------------------------------------------------------------------
// PathSyntaxError

/// The token a path-specification parser was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Name,
    CloseBracket,
    RangeBound,
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expected::Name => "name",
            Expected::CloseBracket => "`]`",
            Expected::RangeBound => "range bound",
            Expected::EndOfInput => "end of input",
        })
    }
}

/// A malformed path specification.
///
/// `offset` counts characters, not bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected} at {offset} in `{spec}`")]
pub struct PathSyntaxError {
    expected: Expected,
    offset: usize,
    spec: String,
}

impl PathSyntaxError {
    pub(crate) fn new(expected: Expected, byte_offset: usize, spec: &str) -> Self {
        Self {
            expected,
            offset: spec[..byte_offset].chars().count(),
            spec: spec.into(),
        }
    }

    #[inline]
    pub const fn expected(&self) -> Expected {
        self.expected
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

// -----------------------------------------------------------------------------
// UnknownFlavor

/// A flavor name that matches no [`Flavor`](crate::Flavor).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown export flavor `{0}`")]
pub struct UnknownFlavor(pub String);

// -----------------------------------------------------------------------------
// ExportError

/// Errors raised while exporting an object graph.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    NotExportable(#[from] NotExportable),
    /// A property value could not be retrieved.
    #[error("Failed to write {property}")]
    PropertyRetrieval {
        owner: &'static str,
        property: &'static str,
        #[source]
        source: PropertyError,
    },
    /// A model was asked to write an object of another type.
    #[error("model of `{expected}` cannot write a `{actual}`")]
    BeanMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// A map key that has no textual form.
    #[error("a {kind} cannot be used as a map key")]
    UnsupportedKey { kind: &'static str },
    #[error(transparent)]
    Io(#[from] io::Error),
}
