use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to spell paths to `bx_*` crates in
/// generated code.
///
/// A derive expanded in a downstream crate cannot write `crate::` or assume
/// the name under which the runtime crate was imported, so the path is
/// looked up in the manifest of the crate being compiled.
///
/// # Example
///
/// ```rust
/// # use bx_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("bx_export"));
/// ```
///
/// # Resolution rules
///
/// 1. The requested crate is a direct dependency: `::bx_export`.
/// 2. The name starts with `bx_` and the caller depends on the facade
///    `bx_core`: `::bx_core::export`.
/// 3. Same, with the facade renamed to `bx`: `::bx::export`.
/// 4. Steps 1 to 3 again over `dev-dependencies`.
/// 5. Otherwise `::bx_export`.
///
/// A crate that expands its own derives must declare
/// `extern crate self as bx_export;` so that rule 5 resolves.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const CORE_FACADE_NAME: &str = "bx_core";
const SHORT_FACADE_NAME: &str = "bx";
const CRATE_PREFIX: &str = "bx_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let Some(dir) = env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("CARGO_MANIFEST_DIR should be defined by cargo");
        };
        let mut path = PathBuf::from(dir);
        path.push("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time_of(path: &Path) -> SystemTime {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }

    #[inline(never)]
    fn read(path: &Path) -> Document<Box<str>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text.into_boxed_str(),
            Err(err) => panic!("Unable to read cargo manifest {}: {err}", path.display()),
        };
        match Document::parse(text) {
            Ok(doc) => doc,
            Err(err) => panic!("Failed to parse cargo manifest {}: {err}", path.display()),
        }
    }

    fn path_of(segments: &[&str]) -> syn::Path {
        let text: String = segments.iter().map(|s| format!("::{s}")).collect();
        match syn::parse_str(&text) {
            Ok(path) => path,
            Err(err) => panic!("`{text}` is not a valid path: {err}"),
        }
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::path_of(&[name]));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        [CORE_FACADE_NAME, SHORT_FACADE_NAME]
            .into_iter()
            .find(|facade| deps.contains_key(facade))
            .map(|facade| Self::path_of(&[facade, module]))
    }

    /// Return the [`syn::Path`] under which the compiled crate sees `name`.
    ///
    /// See the type-level documentation for the lookup order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|table| match self.manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::path_of(&[name]))
    }

    /// Run `func` against the manifest of the crate being compiled.
    ///
    /// Parsed manifests are cached per path and re-read only when the file
    /// changes on disk. The cache lock is global, so call this once per
    /// macro invocation and pass the resulting path around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = Self::modified_time_of(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
