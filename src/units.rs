//! Unit conversion between the labels carried by physical constants
//!
//! All base units are tabulated with their SI factor and grouped by the
//! physical quantity they measure. Compound labels are built from the base
//! symbols with `*`, `/`, whitespace, and `^` exponents, so `m/s`, `eV/Ang`,
//! `J s`, and `m^3/kg/s^2` all resolve without being tabulated themselves.
//!
//! Conversion is a flat multiplicative factor between two labels of the same
//! dimension:
//!
//! ```rust
//! # use atomio::units::conversion_factor;
//! assert_eq!(conversion_factor("nm", "m").unwrap(), 1e-9);
//!
//! let factor = conversion_factor("m/s", "Ang/ps").unwrap();
//! assert!((factor - 0.01).abs() < 1e-14);
//! ```
//!
//! Offset scales such as celsius have no place here, every supported unit is
//! proportional to its SI counterpart.

// external crates
use anyhow::{anyhow, bail, Result};
use log::debug;

/// Exponents of the SI base quantities making up a unit
///
/// Enough to distinguish every group in the tables below, e.g. energy is
/// `kg m^2 / s^2` so `{ mass: 1, length: 2, time: -2 }`. Two labels are
/// convertible exactly when their exponents match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dimension {
    mass: i32,
    length: i32,
    time: i32,
}

impl Dimension {
    const NONE: Self = Self::new(0, 0, 0);
    const MASS: Self = Self::new(1, 0, 0);
    const LENGTH: Self = Self::new(0, 1, 0);
    const TIME: Self = Self::new(0, 0, 1);
    const ENERGY: Self = Self::new(1, 2, -2);
    const FORCE: Self = Self::new(1, 1, -2);

    const fn new(mass: i32, length: i32, time: i32) -> Self {
        Self { mass, length, time }
    }

    fn add(self, other: Self) -> Self {
        Self::new(
            self.mass + other.mass,
            self.length + other.length,
            self.time + other.time,
        )
    }

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.mass - other.mass,
            self.length - other.length,
            self.time - other.time,
        )
    }

    fn scale(self, power: i32) -> Self {
        Self::new(self.mass * power, self.length * power, self.time * power)
    }
}

// Base unit tables as (symbol, SI factor) pairs, one table per quantity.
// Factors convert a value in the tabulated unit to the SI unit of its group.

const MASS_UNITS: &[(&str, f64)] = &[("kg", 1.0), ("g", 1e-3), ("amu", 1.66054e-27)];

const LENGTH_UNITS: &[(&str, f64)] = &[
    ("m", 1.0),
    ("cm", 1e-2),
    ("nm", 1e-9),
    ("pm", 1e-12),
    ("Ang", 1e-10),
    ("Bohr", 5.29177e-11),
];

const TIME_UNITS: &[(&str, f64)] = &[
    ("s", 1.0),
    ("min", 60.0),
    ("hour", 3600.0),
    ("ns", 1e-9),
    ("ps", 1e-12),
    ("fs", 1e-15),
];

const ENERGY_UNITS: &[(&str, f64)] = &[
    ("J", 1.0),
    ("erg", 1e-7),
    ("eV", 1.60219e-19),
    ("meV", 1.60219e-22),
    ("Ry", 2.17991e-18),
    ("mRy", 2.17991e-21),
    ("Ha", 4.35974e-18),
    ("Hartree", 4.35974e-18),
    ("K", 1.38065e-23),
];

const FORCE_UNITS: &[(&str, f64)] = &[("N", 1.0), ("dyn", 1e-5)];

/// SI factor and dimension for a single base symbol
fn base_unit(symbol: &str) -> Option<(f64, Dimension)> {
    const GROUPS: &[(&[(&str, f64)], Dimension)] = &[
        (MASS_UNITS, Dimension::MASS),
        (LENGTH_UNITS, Dimension::LENGTH),
        (TIME_UNITS, Dimension::TIME),
        (ENERGY_UNITS, Dimension::ENERGY),
        (FORCE_UNITS, Dimension::FORCE),
    ];

    GROUPS.iter().find_map(|(table, dimension)| {
        table
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, factor)| (*factor, *dimension))
    })
}

/// One `symbol` or `symbol^power` term of a unit expression
fn parse_term(term: &str) -> Result<(f64, Dimension)> {
    let (symbol, power) = match term.split_once('^') {
        Some((symbol, power)) => {
            let power = power
                .trim()
                .parse::<i32>()
                .map_err(|_| anyhow!("malformed exponent in unit term '{term}'"))?;
            (symbol.trim(), power)
        }
        None => (term, 1),
    };

    if symbol.is_empty() {
        bail!("malformed unit term '{term}'");
    }

    let (factor, dimension) =
        base_unit(symbol).ok_or_else(|| anyhow!("unknown unit '{symbol}'"))?;

    Ok((factor.powi(power), dimension.scale(power)))
}

/// Full unit expression to an SI factor and combined dimension
///
/// Operators apply left to right. Whitespace within a chunk multiplies, so
/// everything between two `/` operators divides as a group, i.e. `J/kg s^2`
/// reads as `J/(kg s^2)`.
fn parse_expression(expression: &str) -> Result<(f64, Dimension)> {
    let mut factor = 1.0;
    let mut dimension = Dimension::NONE;
    let mut divide = false;
    let mut rest = expression.trim();

    if rest.is_empty() {
        bail!("empty unit label");
    }

    loop {
        let (chunk, next) = match rest.find(['*', '/']) {
            Some(i) => (&rest[..i], Some((rest.as_bytes()[i], &rest[i + 1..]))),
            None => (rest, None),
        };

        let chunk = chunk.trim();
        if chunk.is_empty() {
            bail!("malformed unit expression '{expression}'");
        }

        for term in chunk.split_whitespace() {
            let (term_factor, term_dimension) = parse_term(term)?;
            if divide {
                factor /= term_factor;
                dimension = dimension.sub(term_dimension);
            } else {
                factor *= term_factor;
                dimension = dimension.add(term_dimension);
            }
        }

        match next {
            Some((operator, remainder)) => {
                divide = operator == b'/';
                rest = remainder;
            }
            None => break,
        }
    }

    Ok((factor, dimension))
}

/// Multiplicative factor taking a value in `from` units to `to` units
///
/// Fails with an unknown unit error when either label contains a symbol that
/// is not tabulated, and rejects labels of different dimension outright.
///
/// ```rust
/// # use atomio::units::conversion_factor;
/// let factor = conversion_factor("eV", "J").unwrap();
/// assert_eq!(factor, 1.60219e-19);
///
/// assert!(conversion_factor("eV", "kg").is_err());
/// ```
pub fn conversion_factor(from: &str, to: &str) -> Result<f64> {
    let (from_factor, from_dimension) = parse_expression(from)?;
    let (to_factor, to_dimension) = parse_expression(to)?;

    if from_dimension != to_dimension {
        debug!("Dimension mismatch between '{from}' {from_dimension:?} and '{to}' {to_dimension:?}");
        bail!("cannot convert between incompatible units '{from}' and '{to}'");
    }

    Ok(from_factor / to_factor)
}
