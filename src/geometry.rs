//! Atomic geometry container shared by the file handlers
//!
//! Every format that stores structural data is coerced into the same
//! [Geometry] struct, so anything read from one format can be written out to
//! any other without conversion glue.
//!
//! Coordinates are Cartesian and in Angstrom throughout.

// internal modules
use crate::utils::f;

// external crates
use anyhow::{bail, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A collection of atoms with Cartesian coordinates in Angstrom
///
/// The lattice vectors are optional since several formats (xyz in particular)
/// only describe isolated molecules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Species label for every atom, e.g. `C`, `Si`, `O_surface`
    pub species: Vec<String>,
    /// Cartesian coordinate for every atom (Angstrom)
    pub coordinates: Vec<[f64; 3]>,
    /// Lattice vectors as rows (Angstrom), if the structure is periodic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<[[f64; 3]; 3]>,
}

impl Geometry {
    /// Molecular geometry from per-atom labels and coordinates
    ///
    /// Fails when the number of labels does not match the number of
    /// coordinates.
    pub fn new(species: Vec<String>, coordinates: Vec<[f64; 3]>) -> Result<Self> {
        if species.len() != coordinates.len() {
            bail!(
                "Expected one species label per coordinate, found {} labels for {} coordinates",
                species.len(),
                coordinates.len()
            );
        }

        Ok(Self {
            species,
            coordinates,
            cell: None,
        })
    }

    /// Attach lattice vectors, making the structure periodic
    pub fn with_cell(mut self, cell: [[f64; 3]; 3]) -> Self {
        self.cell = Some(cell);
        self
    }

    /// Number of atoms in the geometry
    pub fn natoms(&self) -> usize {
        self.species.len()
    }

    /// Check for a geometry with no atoms at all
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Geometry {\n".to_string();
        s += &f!("    atoms: {}\n", self.natoms());
        s += &f!(
            "    species: {}\n",
            self.species.iter().unique().join(", ")
        );
        s += &f!(
            "    cell: {}\n}}",
            if self.cell.is_some() {
                "periodic"
            } else {
                "molecule"
            }
        );

        write!(f, "{}", s)
    }
}

/// Element symbols indexed by atomic number - 1
const ELEMENT_SYMBOLS: &[&str] = &[
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Atomic number for a species label
///
/// Labels often carry a tag to distinguish otherwise identical species, e.g.
/// `Si1` or `Cgraphene`, so matching falls back to shorter prefixes when the
/// full label is not a known element symbol. A tag that happens to spell a
/// different two-letter symbol will match that symbol, so prefer digit tags.
///
/// ```rust
/// # use atomio::geometry::atomic_number;
/// assert_eq!(atomic_number("Si"), Some(14));
/// assert_eq!(atomic_number("Si1"), Some(14));
/// assert_eq!(atomic_number("Cgraphene"), Some(6));
/// assert_eq!(atomic_number("X"), None);
/// ```
pub fn atomic_number(label: &str) -> Option<usize> {
    let alpha = label.trim_end_matches(|c: char| !c.is_ascii_alphabetic());
    find_symbol(alpha)
        .or_else(|| alpha.get(..2).and_then(find_symbol))
        .or_else(|| alpha.get(..1).and_then(find_symbol))
}

fn find_symbol(symbol: &str) -> Option<usize> {
    ELEMENT_SYMBOLS
        .iter()
        .position(|s| *s == symbol)
        .map(|index| index + 1)
}
