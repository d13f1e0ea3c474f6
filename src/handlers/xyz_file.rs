// internal modules
use crate::geometry::Geometry;
use crate::handlers::{parsers, FileHandler, FileMode, OpenArgs};
use crate::utils::*;

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

// external crates
use anyhow::{anyhow, bail, Context, Result};
use log::trace;

/// Handler for the xyz coordinate format
///
/// The simplest of the geometry formats, and the lowest common denominator
/// for passing structures between codes:
///
/// ```text
/// <number of atoms>
/// <comment line>
/// <species>  <x>  <y>  <z>
/// ...
/// ```
///
/// Anything after the expected atom entries is ignored. On write, the comment
/// line is taken from the `comment` open option when one is provided.
#[derive(Debug)]
pub struct XyzFile {
    path: PathBuf,
    args: OpenArgs,
}

impl XyzFile {
    pub fn new(path: &Path, args: &OpenArgs) -> Self {
        Self {
            path: path.to_path_buf(),
            args: args.clone(),
        }
    }
}

impl FileHandler for XyzFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format_name(&self) -> &'static str {
        "xyz"
    }

    fn read_geometry(&self) -> Result<Geometry> {
        let file = File::open(&self.path)
            .with_context(|| f!("Could not open {}", self.path.display()))?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => bail!("Unexpected empty file {}", self.path.display()),
        };
        let (_, natoms) = parsers::unsigned_integer(&header)
            .map_err(|_| anyhow!("Failed to parse atom count from \"{header}\""))?;

        // the comment line is part of the format, the content is irrelevant
        match lines.next() {
            Some(line) => trace!("[Comment] {}", line?),
            None => bail!("Unexpected end of file in {}", self.path.display()),
        };

        let mut species = Vec::with_capacity(natoms);
        let mut coordinates = Vec::with_capacity(natoms);
        for line in lines.by_ref().take(natoms) {
            let line = line?;
            let (_, (label, coordinate)) = parsers::xyz_atom(&line)
                .map_err(|_| anyhow!("Failed to parse atom entry from \"{line}\""))?;
            species.push(label.to_string());
            coordinates.push(coordinate);
        }

        if species.len() != natoms {
            bail!(
                "Expected {natoms} atom entries in {}, found {}",
                self.path.display(),
                species.len()
            );
        }

        Geometry::new(species, coordinates)
    }

    fn write_geometry(&self, geometry: &Geometry) -> Result<()> {
        if self.args.mode != FileMode::Write {
            bail!("{} was not opened for writing", self.path.display());
        }

        let file = File::create(&self.path)
            .with_context(|| f!("Could not create {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", geometry.natoms())?;
        writeln!(writer, "{}", self.args.option("comment").unwrap_or_default())?;

        for (label, [x, y, z]) in geometry.species.iter().zip(&geometry.coordinates) {
            writeln!(writer, "{label:<4}{x:>18.10}{y:>18.10}{z:>18.10}")?;
        }

        Ok(())
    }
}
