// internal modules
use crate::geometry::Geometry;
use crate::handlers::{FileHandler, FileMode, OpenArgs};
use crate::utils::f;

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// external crates
use anyhow::{bail, Context, Result};

/// Handler for geometries serialised as JSON
///
/// A direct serde round-trip of [Geometry], handy for passing structures to
/// plotting scripts and anything else that would rather not parse the
/// simulation formats.
#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
    args: OpenArgs,
}

impl JsonFile {
    pub fn new(path: &Path, args: &OpenArgs) -> Self {
        Self {
            path: path.to_path_buf(),
            args: args.clone(),
        }
    }
}

impl FileHandler for JsonFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format_name(&self) -> &'static str {
        "json"
    }

    fn read_geometry(&self) -> Result<Geometry> {
        let file = File::open(&self.path)
            .with_context(|| f!("Could not open {}", self.path.display()))?;
        let geometry = serde_json::from_reader(BufReader::new(file))
            .with_context(|| f!("Failed to deserialise geometry from {}", self.path.display()))?;
        Ok(geometry)
    }

    fn write_geometry(&self, geometry: &Geometry) -> Result<()> {
        if self.args.mode != FileMode::Write {
            bail!("{} was not opened for writing", self.path.display());
        }

        let file = File::create(&self.path)
            .with_context(|| f!("Could not create {}", self.path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), geometry)
            .with_context(|| f!("Failed to serialise geometry to {}", self.path.display()))?;

        Ok(())
    }
}
