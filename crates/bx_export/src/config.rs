use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use crate::info::BeanInfo;
use crate::intercept::{DefaultInterceptor, ExportInterceptor};
use crate::Flavor;

// -----------------------------------------------------------------------------
// ClassAttribute

/// When to stamp the runtime type of a bean onto its object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassPolicy {
    Never,
    Always,
    /// Only where the declared type of the slot differs from the runtime
    /// type, e.g. behind a `Box<dyn Trait>`. The root has no declared type.
    IfNeeded,
}

/// A [`ClassPolicy`] plus the form of the printed name.
///
/// # Examples
///
/// ```
/// use bx_export::ClassAttribute;
/// use bx_export::info::BeanInfo;
///
/// struct Job;
/// let info = BeanInfo::new::<Job>("Job");
///
/// assert_eq!(ClassAttribute::NEVER.print(None, &info), None);
/// assert_eq!(ClassAttribute::ALWAYS.simple().print(None, &info), Some("Job"));
/// assert_eq!(ClassAttribute::IF_NEEDED.simple().print(Some(info.type_id()), &info), None);
/// assert!(ClassAttribute::IF_NEEDED.print(None, &info).unwrap().ends_with("::Job"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassAttribute {
    policy: ClassPolicy,
    simple: bool,
}

impl ClassAttribute {
    pub const NEVER: Self = Self::new(ClassPolicy::Never);
    pub const ALWAYS: Self = Self::new(ClassPolicy::Always);
    pub const IF_NEEDED: Self = Self::new(ClassPolicy::IfNeeded);

    /// Prints full type paths.
    #[inline]
    pub const fn new(policy: ClassPolicy) -> Self {
        Self {
            policy,
            simple: false,
        }
    }

    /// The same policy, printing short type names.
    #[inline]
    pub const fn simple(self) -> Self {
        Self {
            simple: true,
            ..self
        }
    }

    #[inline]
    pub const fn policy(&self) -> ClassPolicy {
        self.policy
    }

    #[inline]
    pub const fn is_simple(&self) -> bool {
        self.simple
    }

    /// The name to stamp on a bean of type `actual` stored in a slot
    /// declared as `expected`, or `None` to stamp nothing.
    pub fn print(&self, expected: Option<TypeId>, actual: &BeanInfo) -> Option<&'static str> {
        let needed = match self.policy {
            ClassPolicy::Never => false,
            ClassPolicy::Always => true,
            ClassPolicy::IfNeeded => expected != Some(actual.type_id()),
        };
        match (needed, self.simple) {
            (false, _) => None,
            (true, true) => Some(actual.type_name()),
            (true, false) => Some(actual.type_path()),
        }
    }
}

impl Default for ClassAttribute {
    #[inline]
    fn default() -> Self {
        Self::NEVER
    }
}

// -----------------------------------------------------------------------------
// ExportConfig

/// Settings of one export, fixed once built.
///
/// Cloning is cheap.
///
/// # Examples
///
/// ```
/// use bx_export::{ClassAttribute, ExportConfig, Flavor};
///
/// let config = ExportConfig::builder()
///     .with_pretty_print(true)
///     .with_flavor(Flavor::Python)
///     .with_class_attribute(ClassAttribute::IF_NEEDED.simple())
///     .build();
///
/// assert!(config.pretty_print());
/// assert!(!config.skip_if_fail());
/// assert_eq!(config.flavor(), Flavor::Python);
/// ```
#[derive(Clone)]
pub struct ExportConfig {
    pretty_print: bool,
    skip_if_fail: bool,
    class_attribute: ClassAttribute,
    class_field: bool,
    flavor: Flavor,
    interceptor: Arc<dyn ExportInterceptor>,
    callback: Option<Arc<str>>,
}

impl ExportConfig {
    #[inline]
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::new()
    }

    /// Indent nested containers, two spaces per level.
    #[inline]
    pub const fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    /// Write `null` for a property whose getter fails, and an empty object
    /// for a nested value that is not an exported bean, instead of
    /// aborting.
    #[inline]
    pub const fn skip_if_fail(&self) -> bool {
        self.skip_if_fail
    }

    #[inline]
    pub const fn class_attribute(&self) -> ClassAttribute {
        self.class_attribute
    }

    /// Write a `"class"` member naming the concrete type at the top of
    /// every bean.
    #[inline]
    pub const fn class_field(&self) -> bool {
        self.class_field
    }

    #[inline]
    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }

    #[inline]
    pub fn interceptor(&self) -> &dyn ExportInterceptor {
        &*self.interceptor
    }

    /// Function name wrapping [`Flavor::Jsonp`] output.
    #[inline]
    pub fn callback(&self) -> Option<&str> {
        self.callback.as_deref()
    }
}

impl Default for ExportConfig {
    #[inline]
    fn default() -> Self {
        ExportConfigBuilder::new().build()
    }
}

impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("pretty_print", &self.pretty_print)
            .field("skip_if_fail", &self.skip_if_fail)
            .field("class_attribute", &self.class_attribute)
            .field("class_field", &self.class_field)
            .field("flavor", &self.flavor)
            .field("callback", &self.callback)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// ExportConfigBuilder

/// Builder for [`ExportConfig`].
#[derive(Clone)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ExportConfig {
                pretty_print: false,
                skip_if_fail: false,
                class_attribute: ClassAttribute::NEVER,
                class_field: false,
                flavor: Flavor::Json,
                interceptor: Arc::new(DefaultInterceptor),
                callback: None,
            },
        }
    }

    #[inline]
    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.config.pretty_print = pretty_print;
        self
    }

    #[inline]
    pub fn with_skip_if_fail(mut self, skip_if_fail: bool) -> Self {
        self.config.skip_if_fail = skip_if_fail;
        self
    }

    #[inline]
    pub fn with_class_attribute(mut self, class_attribute: ClassAttribute) -> Self {
        self.config.class_attribute = class_attribute;
        self
    }

    #[inline]
    pub fn with_class_field(mut self, class_field: bool) -> Self {
        self.config.class_field = class_field;
        self
    }

    #[inline]
    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.config.flavor = flavor;
        self
    }

    #[inline]
    pub fn with_interceptor(mut self, interceptor: impl ExportInterceptor + 'static) -> Self {
        self.config.interceptor = Arc::new(interceptor);
        self
    }

    #[inline]
    pub fn with_callback(mut self, callback: impl Into<Arc<str>>) -> Self {
        self.config.callback = Some(callback.into());
        self
    }

    #[inline]
    pub fn build(self) -> ExportConfig {
        self.config
    }
}

impl Default for ExportConfigBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
