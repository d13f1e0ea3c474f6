// Conversion factors between unit labels

// crate under test
use atomio::units::conversion_factor;

// external crates
use rstest::rstest;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= expected.abs() * 1e-12,
        "{actual} differs from {expected}"
    );
}

#[rstest]
#[case("m", "nm", 1e9)]
#[case("nm", "m", 1e-9)]
#[case("Ang", "Bohr", 1e-10 / 5.29177e-11)]
#[case("g", "amu", 1e-3 / 1.66054e-27)]
#[case("eV", "J", 1.60219e-19)]
#[case("Ry", "eV", 2.17991e-18 / 1.60219e-19)]
#[case("hour", "s", 3600.0)]
#[case("m/s", "Ang/ps", 0.01)]
#[case("eV/Ang", "N", 1.60219e-19 / 1e-10)]
#[case("J s", "eV s", 1.0 / 1.60219e-19)]
#[case("m^2", "cm^2", 1e4)]
#[case("m^3/kg/s^2", "cm^3/g/s^2", 1e3)]
fn converts_between_compatible_units(
    #[case] from: &str,
    #[case] to: &str,
    #[case] expected: f64,
) {
    assert_close(conversion_factor(from, to).unwrap(), expected);
}

#[rstest]
#[case("m", "nm")]
#[case("eV", "Ry")]
#[case("m/s", "Ang/ps")]
#[case("m^3/kg/s^2", "cm^3/g/s^2")]
fn round_trips_multiply_to_unity(#[case] from: &str, #[case] to: &str) {
    let there = conversion_factor(from, to).unwrap();
    let back = conversion_factor(to, from).unwrap();
    assert_close(there * back, 1.0);
}

#[test]
fn identical_labels_are_unity() {
    assert_eq!(conversion_factor("eV", "eV").unwrap(), 1.0);
    assert_eq!(conversion_factor("m/s", "m/s").unwrap(), 1.0);
}

#[rstest]
#[case("banana", "m")]
#[case("m", "banana")]
#[case("m/banana", "m/s")]
fn unknown_symbols_are_rejected(#[case] from: &str, #[case] to: &str) {
    let error = conversion_factor(from, to).unwrap_err();
    assert!(error.to_string().contains("unknown unit 'banana'"));
}

#[rstest]
#[case("m", "kg")]
#[case("eV", "Ang")]
#[case("m/s", "m")]
#[case("m^2", "m^3")]
fn incompatible_dimensions_are_rejected(#[case] from: &str, #[case] to: &str) {
    let error = conversion_factor(from, to).unwrap_err();
    assert!(error.to_string().contains("incompatible units"));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("m/")]
#[case("/s")]
#[case("m**s")]
#[case("m^x")]
fn malformed_expressions_are_rejected(#[case] label: &str) {
    assert!(conversion_factor(label, "m").is_err());
}
