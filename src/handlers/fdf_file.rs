// internal modules
use crate::geometry::{atomic_number, Geometry};
use crate::handlers::{parsers, FileHandler, FileMode, OpenArgs};
use crate::utils::*;

// standard library
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

// external crates
use anyhow::{anyhow, bail, Context, Result};
use itertools::Itertools;
use log::trace;
use nom::IResult;

/// Handler for SIESTA fdf input files
///
/// Only the structural part of the flexible data format is handled, which is
/// all the information a [Geometry] can hold:
///
/// | Input                               | Interpretation          |
/// | ----------------------------------- | ----------------------- |
/// | `NumberOfAtoms`                     | atom count sanity check |
/// | `%block LatticeVectors`             | cell (Angstrom rows)    |
/// | `%block ChemicalSpeciesLabel`       | species index to label  |
/// | `%block AtomicCoordinatesAndAtomicSpecies` | coordinates + species index |
///
/// Keys are matched case-insensitively as the format prescribes, and any
/// other key or block is skipped. Coordinates are taken as Angstrom, so a
/// `LatticeConstant` other than `1.0 Ang` is rejected rather than misread.
#[derive(Debug)]
pub struct FdfFile {
    path: PathBuf,
    args: OpenArgs,
}

impl FdfFile {
    pub fn new(path: &Path, args: &OpenArgs) -> Self {
        Self {
            path: path.to_path_buf(),
            args: args.clone(),
        }
    }

    /// Next line of real content inside a block
    fn next_content_line<I>(lines: &mut I) -> Result<String>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        for line in lines {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || parsers::is_fdf_comment(trimmed) {
                continue;
            }
            return Ok(line);
        }
        bail!("Unexpected end of file inside an fdf block");
    }

    /// Three lattice vector rows followed by the block close
    fn read_lattice_block<I>(lines: &mut I) -> Result<[[f64; 3]; 3]>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        let mut cell = [[0.0; 3]; 3];
        for vector in cell.iter_mut() {
            let line = Self::next_content_line(lines)?;
            let (_, triplet) = parsers::coordinate_triplet(&line)
                .map_err(|_| anyhow!("Failed to parse lattice vector from \"{line}\""))?;
            *vector = triplet;
        }

        let line = Self::next_content_line(lines)?;
        if !parsers::is_fdf_block_close(&line) {
            bail!("Expected %endblock after three lattice vectors, found \"{line}\"");
        }

        Ok(cell)
    }

    fn read_species_block<I>(lines: &mut I, labels: &mut HashMap<usize, String>) -> Result<()>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        loop {
            let line = Self::next_content_line(lines)?;
            if parsers::is_fdf_block_close(&line) {
                return Ok(());
            }

            let (_, (index, z, label)) = parsers::fdf_species_entry(&line)
                .map_err(|_| anyhow!("Failed to parse species entry from \"{line}\""))?;
            trace!("[Species] {index} -> {label} (Z={z})");
            labels.insert(index, label.to_string());
        }
    }

    fn read_coordinate_block<I>(lines: &mut I, atoms: &mut Vec<([f64; 3], usize)>) -> Result<()>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        loop {
            let line = Self::next_content_line(lines)?;
            if parsers::is_fdf_block_close(&line) {
                return Ok(());
            }

            let (_, entry) = parsers::fdf_coordinate_entry(&line)
                .map_err(|_| anyhow!("Failed to parse coordinate entry from \"{line}\""))?;
            atoms.push(entry);
        }
    }

    fn skip_block<I>(lines: &mut I) -> Result<()>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        loop {
            if parsers::is_fdf_block_close(&Self::next_content_line(lines)?) {
                return Ok(());
            }
        }
    }
}

impl FileHandler for FdfFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format_name(&self) -> &'static str {
        "fdf"
    }

    fn read_geometry(&self) -> Result<Geometry> {
        let file = File::open(&self.path)
            .with_context(|| f!("Could not open {}", self.path.display()))?;
        let mut lines = BufReader::new(file).lines();

        let mut natoms: Option<usize> = None;
        let mut cell: Option<[[f64; 3]; 3]> = None;
        let mut labels: HashMap<usize, String> = HashMap::new();
        let mut atoms: Vec<([f64; 3], usize)> = Vec::new();

        while let Some(line) = lines.next() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || parsers::is_fdf_comment(trimmed) {
                continue;
            }

            if let IResult::Ok((_, label)) = parsers::fdf_block_open(trimmed) {
                match label.to_ascii_lowercase().as_str() {
                    "latticevectors" => cell = Some(Self::read_lattice_block(&mut lines)?),
                    "chemicalspecieslabel" => Self::read_species_block(&mut lines, &mut labels)?,
                    "atomiccoordinatesandatomicspecies" => {
                        Self::read_coordinate_block(&mut lines, &mut atoms)?
                    }
                    _ => {
                        trace!("[ Skip  ] %block {label}");
                        Self::skip_block(&mut lines)?;
                    }
                }
                continue;
            }

            if let IResult::Ok((_, (key, value))) = parsers::fdf_key_value(trimmed) {
                if key.eq_ignore_ascii_case("NumberOfAtoms") {
                    natoms = Some(value.parse().map_err(|_| {
                        anyhow!("Failed to parse atom count from \"{line}\"")
                    })?);
                } else if key.eq_ignore_ascii_case("LatticeConstant") {
                    // coordinates are taken verbatim, so only a unity Angstrom
                    // scale can be honoured
                    let scale = value.split_whitespace().join(" ");
                    if !["1.0 Ang", "1. Ang", "1 Ang"]
                        .iter()
                        .any(|accepted| scale.eq_ignore_ascii_case(accepted))
                    {
                        bail!("Unsupported LatticeConstant \"{scale}\", only unity Angstrom scaling is handled");
                    }
                } else {
                    trace!("[ Skip  ] {key}");
                }
            }
        }

        if atoms.is_empty() {
            bail!(
                "No AtomicCoordinatesAndAtomicSpecies block found in {}",
                self.path.display()
            );
        }

        if let Some(expected) = natoms {
            if expected != atoms.len() {
                bail!(
                    "NumberOfAtoms is {expected} but {} coordinate entries were found",
                    atoms.len()
                );
            }
        }

        let mut species = Vec::with_capacity(atoms.len());
        let mut coordinates = Vec::with_capacity(atoms.len());
        for (coordinate, index) in atoms {
            let label = labels
                .get(&index)
                .ok_or_else(|| anyhow!("Species index {index} has no ChemicalSpeciesLabel entry"))?;
            species.push(label.clone());
            coordinates.push(coordinate);
        }

        let mut geometry = Geometry::new(species, coordinates)?;
        if let Some(cell) = cell {
            geometry = geometry.with_cell(cell);
        }

        Ok(geometry)
    }

    fn write_geometry(&self, geometry: &Geometry) -> Result<()> {
        if self.args.mode != FileMode::Write {
            bail!("{} was not opened for writing", self.path.display());
        }

        let unique: Vec<&str> = geometry.species.iter().map(String::as_str).unique().collect();

        let file = File::create(&self.path)
            .with_context(|| f!("Could not create {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "NumberOfAtoms    {}", geometry.natoms())?;
        writeln!(writer, "NumberOfSpecies  {}", unique.len())?;
        writeln!(writer)?;

        if let Some(cell) = &geometry.cell {
            writeln!(writer, "%block LatticeVectors")?;
            for [x, y, z] in cell {
                writeln!(writer, "{x:>16.9}{y:>16.9}{z:>16.9}")?;
            }
            writeln!(writer, "%endblock LatticeVectors")?;
            writeln!(writer)?;
        }

        writeln!(writer, "%block ChemicalSpeciesLabel")?;
        for (index, label) in unique.iter().enumerate() {
            // unknown labels get a placeholder atomic number of zero
            let z = atomic_number(label).unwrap_or(0);
            writeln!(writer, "{:>4}{z:>5}  {label}", index + 1)?;
        }
        writeln!(writer, "%endblock ChemicalSpeciesLabel")?;
        writeln!(writer)?;

        writeln!(writer, "%block AtomicCoordinatesAndAtomicSpecies")?;
        for (label, [x, y, z]) in geometry.species.iter().zip(&geometry.coordinates) {
            // always present, the unique list was built from these labels
            let index = unique.iter().position(|u| *u == label.as_str()).unwrap() + 1;
            writeln!(writer, "{x:>16.9}{y:>16.9}{z:>16.9}{index:>4}")?;
        }
        writeln!(writer, "%endblock AtomicCoordinatesAndAtomicSpecies")?;

        Ok(())
    }
}
