//! Nom parsers and line classifiers for the text formats
//!
//! Kept separate from the handlers so the line-level grammar is in one place.
//! All parsers work on a single line of input and leave anything trailing
//! untouched.

// external crates
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{digit1, i32 as signed_integer, multispace0};
use nom::combinator::map_res;
use nom::multi::many1;
use nom::number::complete::double;
use nom::sequence::{preceded, tuple};
use nom::IResult;

/// Comment line in a table file, `#` prefixed
pub fn is_table_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Comment line in an fdf file, `#`, `;`, or `!` prefixed
pub fn is_fdf_comment(line: &str) -> bool {
    matches!(line.trim_start().chars().next(), Some('#' | ';' | '!'))
}

/// Close of any fdf block, e.g. `%endblock LatticeVectors`
pub fn is_fdf_block_close(line: &str) -> bool {
    line.trim_start()
        .get(..9)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("%endblock"))
}

/// Leading unsigned integer, e.g. the atom count line of an xyz file
pub fn unsigned_integer(i: &str) -> IResult<&str, usize> {
    map_res(preceded(multispace0, digit1), str::parse)(i)
}

/// Species label, e.g. `C`, `Si`, `O2`, `C_surface`
pub fn species_label(i: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
    )(i)
}

/// Single whitespace-padded float
fn padded_double(i: &str) -> IResult<&str, f64> {
    preceded(multispace0, double)(i)
}

/// Three whitespace-separated floats
pub fn coordinate_triplet(i: &str) -> IResult<&str, [f64; 3]> {
    let (i, (x, y, z)) = tuple((padded_double, padded_double, padded_double))(i)?;
    Ok((i, [x, y, z]))
}

/// Atom entry in an xyz file: `species x y z`
pub fn xyz_atom(i: &str) -> IResult<&str, (&str, [f64; 3])> {
    tuple((species_label, coordinate_triplet))(i)
}

/// Row of whitespace-separated numbers in a table file
pub fn data_row(i: &str) -> IResult<&str, Vec<f64>> {
    many1(padded_double)(i)
}

/// Open of an fdf block, returning the block label
pub fn fdf_block_open(i: &str) -> IResult<&str, &str> {
    preceded(tuple((multispace0, tag_no_case("%block"))), fdf_label)(i)
}

/// Fdf label token, e.g. `LatticeVectors`, `NumberOfAtoms`
fn fdf_label(i: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'),
    )(i)
}

/// Fdf `Key value` line, returning the key and the trimmed remainder
pub fn fdf_key_value(i: &str) -> IResult<&str, (&str, &str)> {
    let (rest, key) = fdf_label(i)?;
    Ok(("", (key, rest.trim())))
}

/// Entry in a ChemicalSpeciesLabel block: `index Z label`
pub fn fdf_species_entry(i: &str) -> IResult<&str, (usize, i32, &str)> {
    tuple((
        unsigned_integer,
        preceded(multispace0, signed_integer),
        species_label,
    ))(i)
}

/// Entry in an AtomicCoordinatesAndAtomicSpecies block: `x y z species-index`
pub fn fdf_coordinate_entry(i: &str) -> IResult<&str, ([f64; 3], usize)> {
    tuple((coordinate_triplet, unsigned_integer))(i)
}
