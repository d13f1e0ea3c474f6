//! Library of file handlers for the supported formats
//!
//! Each handler owns a path and the open arguments it was constructed with,
//! and exposes whatever subset of the [FileHandler] contract its format can
//! honour. The registry constructs them on demand, but nothing stops direct
//! use when the format is known up front.

// internal modules
use crate::geometry::Geometry;
use crate::registry::FormatRegistry;

// standard library
use std::collections::HashMap;
use std::path::Path;

// external crates
use anyhow::{bail, Result};

// files under the handlers module
mod fdf_file;
mod json_file;
pub mod parsers;
mod table_file;
mod xyz_file;

// inline important the handler types for a nice API
#[doc(inline)]
pub use crate::handlers::fdf_file::FdfFile;

#[doc(inline)]
pub use crate::handlers::json_file::JsonFile;

#[doc(inline)]
pub use crate::handlers::table_file::TableFile;

#[doc(inline)]
pub use crate::handlers::xyz_file::XyzFile;

/// Open mode forwarded to handler constructors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// Existing file, handler may read
    #[default]
    Read,
    /// Handler may create or truncate the file
    Write,
}

/// Arguments forwarded to a handler constructor by the registry
///
/// An open mode plus free-form options the individual handlers may consult,
/// e.g. the `comment` option picked up by the xyz and table writers. Unknown
/// options are ignored.
#[derive(Debug, Clone, Default)]
pub struct OpenArgs {
    /// What the handler is allowed to do with the file
    pub mode: FileMode,
    options: HashMap<String, String>,
}

impl OpenArgs {
    /// Arguments for reading an existing file
    pub fn read() -> Self {
        Self::default()
    }

    /// Arguments for creating or truncating a file
    pub fn write() -> Self {
        Self {
            mode: FileMode::Write,
            ..Default::default()
        }
    }

    /// Attach a named option for the handler to interpret
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Look up a named option
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// Uniform read/write contract every handler honours
///
/// Formats differ in what they can store, so all content operations default
/// to an unsupported error and each handler overrides the ones that make
/// sense. An xyz file has geometry but no column data, a table file is the
/// other way around.
pub trait FileHandler: std::fmt::Debug {
    /// Path the handler was constructed for
    fn path(&self) -> &Path;

    /// Short name of the format, e.g. `xyz`
    fn format_name(&self) -> &'static str;

    /// Read the structure stored in the file
    fn read_geometry(&self) -> Result<Geometry> {
        bail!("the {} format does not store geometry data", self.format_name())
    }

    /// Write a structure to the file
    fn write_geometry(&self, _geometry: &Geometry) -> Result<()> {
        bail!("the {} format does not store geometry data", self.format_name())
    }

    /// Read numeric column data from the file
    fn read_data(&self) -> Result<Vec<Vec<f64>>> {
        bail!("the {} format does not store column data", self.format_name())
    }

    /// Write numeric columns to the file
    fn write_data(&self, _columns: &[Vec<f64>]) -> Result<()> {
        bail!("the {} format does not store column data", self.format_name())
    }
}

/// Wire every built-in handler into a registry
///
/// Cased and uppercase extension variants are registered separately, lookup
/// is deliberately case-sensitive.
pub(crate) fn register_defaults(registry: &mut FormatRegistry) {
    registry.register("xyz", |path, args| {
        Ok(Box::new(XyzFile::new(path, args)) as Box<dyn FileHandler>)
    });
    registry.register("XYZ", |path, args| {
        Ok(Box::new(XyzFile::new(path, args)) as Box<dyn FileHandler>)
    });
    registry.register("fdf", |path, args| {
        Ok(Box::new(FdfFile::new(path, args)) as Box<dyn FileHandler>)
    });
    registry.register("FDF", |path, args| {
        Ok(Box::new(FdfFile::new(path, args)) as Box<dyn FileHandler>)
    });
    registry.register("dat", |path, args| {
        Ok(Box::new(TableFile::new(path, args)) as Box<dyn FileHandler>)
    });
    registry.register("DAT", |path, args| {
        Ok(Box::new(TableFile::new(path, args)) as Box<dyn FileHandler>)
    });
    registry.register("json", |path, args| {
        Ok(Box::new(JsonFile::new(path, args)) as Box<dyn FileHandler>)
    });
    registry.register("JSON", |path, args| {
        Ok(Box::new(JsonFile::new(path, args)) as Box<dyn FileHandler>)
    });
}

/// Read a geometry from any of the supported formats
///
/// The format is picked from the file extension through a default registry.
///
/// - `path` - Path to the file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```ignore
/// // Read a structure from whatever format the extension says it is
/// let geometry: Geometry = atomio::read_geometry("path/to/structure.xyz")?;
/// ```
pub fn read_geometry<P: AsRef<Path>>(path: P) -> Result<Geometry> {
    let registry = FormatRegistry::with_defaults();
    let handler = registry.resolve(path.as_ref(), &OpenArgs::read())?;
    handler.read_geometry()
}

/// Write a geometry to any of the supported formats
///
/// Counterpart to [read_geometry], picking the output format from the file
/// extension.
///
/// Example
/// ```ignore
/// // Convert a SIESTA input to plain xyz
/// let geometry = atomio::read_geometry("path/to/input.fdf")?;
/// atomio::write_geometry("path/to/structure.xyz", &geometry)?;
/// ```
pub fn write_geometry<P: AsRef<Path>>(path: P, geometry: &Geometry) -> Result<()> {
    let registry = FormatRegistry::with_defaults();
    let handler = registry.resolve(path.as_ref(), &OpenArgs::write())?;
    handler.write_geometry(geometry)
}

/// Read numeric column data from a table-like file
///
/// Example
/// ```ignore
/// let columns: Vec<Vec<f64>> = atomio::read_table("path/to/results.dat")?;
/// ```
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    let registry = FormatRegistry::with_defaults();
    let handler = registry.resolve(path.as_ref(), &OpenArgs::read())?;
    handler.read_data()
}

/// Write numeric columns to a table-like file
///
/// Example
/// ```ignore
/// atomio::write_table("path/to/results.dat", &[energies, fluxes])?;
/// ```
pub fn write_table<P: AsRef<Path>>(path: P, columns: &[Vec<f64>]) -> Result<()> {
    let registry = FormatRegistry::with_defaults();
    let handler = registry.resolve(path.as_ref(), &OpenArgs::write())?;
    handler.write_data(columns)
}
