//! File-type dispatch from extension to handler
//!
//! A [FormatRegistry] maps file-extension strings to handler constructors and
//! resolves a path to a live handler on demand. The usage pattern is to wire
//! the registry up once at startup and only resolve afterwards:
//!
//! ```rust
//! use atomio::registry::FormatRegistry;
//! use atomio::OpenArgs;
//!
//! let registry = FormatRegistry::with_defaults();
//! let handler = registry.resolve("structure.xyz", &OpenArgs::read()).unwrap();
//! assert_eq!(handler.format_name(), "xyz");
//! ```
//!
//! Extension matching is a flat, case-sensitive string lookup. There is no
//! content sniffing and no normalisation, which is why the defaults register
//! `xyz` and `XYZ` as two separate entries.
//!
//! Resolution failures are collapsed into a single "not a supported file
//! format" error whether the extension was never registered or the handler
//! constructor itself failed. The suppressed cause is logged at debug level
//! for anyone who needs to dig.

// internal modules
use crate::handlers::{self, FileHandler, OpenArgs};

// standard library
use std::collections::HashMap;
use std::path::Path;

// external crates
use anyhow::{anyhow, Result};
use itertools::Itertools;
use log::debug;

/// Constructor invoked with the path and forwarded open arguments
type HandlerBuilder = Box<dyn Fn(&Path, &OpenArgs) -> Result<Box<dyn FileHandler>>>;

/// Registry of file formats keyed by extension
///
/// Registration overwrites, so the last constructor registered for an
/// extension is the one in effect. Nothing about the constructor is
/// validated up front, a broken one simply fails at resolution time.
pub struct FormatRegistry {
    builders: HashMap<String, HandlerBuilder>,
}

impl FormatRegistry {
    /// An empty registry with nothing wired up
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// A registry with every built-in handler registered
    ///
    /// | Extensions   | Handler                                    |
    /// | ------------ | ------------------------------------------ |
    /// | `xyz`, `XYZ` | [XyzFile](crate::handlers::XyzFile)        |
    /// | `fdf`, `FDF` | [FdfFile](crate::handlers::FdfFile)        |
    /// | `dat`, `DAT` | [TableFile](crate::handlers::TableFile)    |
    /// | `json`, `JSON` | [JsonFile](crate::handlers::JsonFile)    |
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        handlers::register_defaults(&mut registry);
        registry
    }

    /// Attach a handler constructor to an extension
    ///
    /// Public so users can wire in their own formats, or replace a built-in
    /// by registering over its extension.
    pub fn register<F>(&mut self, extension: &str, builder: F)
    where
        F: Fn(&Path, &OpenArgs) -> Result<Box<dyn FileHandler>> + 'static,
    {
        if self
            .builders
            .insert(extension.to_string(), Box::new(builder))
            .is_some()
        {
            debug!("Superseded the handler registered for extension '{extension}'");
        }
    }

    /// Check whether an extension has a registered handler
    pub fn is_registered(&self, extension: &str) -> bool {
        self.builders.contains_key(extension)
    }

    /// Sorted list of all registered extensions
    pub fn extensions(&self) -> Vec<&str> {
        self.builders.keys().map(String::as_str).sorted().collect()
    }

    /// Construct the handler registered for the extension of `path`
    ///
    /// The extension is the text after the last `.` of the final path
    /// component, or the empty string when there is none. Both an unknown
    /// extension and a failing constructor surface the same opaque error,
    /// with the underlying cause logged rather than propagated.
    pub fn resolve<P: AsRef<Path>>(&self, path: P, args: &OpenArgs) -> Result<Box<dyn FileHandler>> {
        let path = path.as_ref();
        let extension = file_extension(path);

        match self.builders.get(extension) {
            Some(builder) => builder(path, args).map_err(|cause| {
                debug!(
                    "Handler construction failed for {}: {cause}",
                    path.display()
                );
                Self::unsupported(path)
            }),
            None => {
                debug!(
                    "No handler registered for extension '{extension}' of {}",
                    path.display()
                );
                Err(Self::unsupported(path))
            }
        }
    }

    fn unsupported(path: &Path) -> anyhow::Error {
        anyhow!(
            "\"{}\" is not a supported file format, possibly the format has not been implemented",
            path.display()
        )
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension of the final path component
///
/// Text after the last `.`, so `archive.tar.gz` gives `gz` and a file with
/// no dot at all gives the empty string.
fn file_extension(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, extension)| extension)
        .unwrap_or("")
}
