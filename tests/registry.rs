// Dispatch behaviour of the format registry

// crate under test
use atomio::registry::FormatRegistry;
use atomio::{FileHandler, OpenArgs};

// standard library
use std::path::Path;

// external crates
use rstest::rstest;

/// Stand-in handler for registration tests
#[derive(Debug)]
struct Marker;

impl FileHandler for Marker {
    fn path(&self) -> &Path {
        Path::new("")
    }

    fn format_name(&self) -> &'static str {
        "marker"
    }
}

#[rstest]
#[case("test.xyz", "xyz")]
#[case("test.XYZ", "xyz")]
#[case("test.fdf", "fdf")]
#[case("test.FDF", "fdf")]
#[case("test.dat", "table")]
#[case("test.DAT", "table")]
#[case("test.json", "json")]
#[case("test.JSON", "json")]
fn default_extensions_resolve(#[case] path: &str, #[case] format: &str) {
    let registry = FormatRegistry::with_defaults();
    let handler = registry.resolve(path, &OpenArgs::read()).unwrap();
    assert_eq!(handler.format_name(), format);
}

#[rstest]
#[case("test.xz")]
#[case("test")]
#[case("")]
#[case("no/extension/here")]
#[case("archive.tar.gz")]
fn unknown_extensions_are_one_opaque_error(#[case] path: &str) {
    let registry = FormatRegistry::with_defaults();
    let error = registry.resolve(path, &OpenArgs::read()).unwrap_err();
    assert!(error.to_string().contains("not a supported file format"));
}

#[test]
fn last_registration_wins() {
    let mut registry = FormatRegistry::with_defaults();
    registry.register("xyz", |_, _| Ok(Box::new(Marker) as Box<dyn FileHandler>));

    let handler = registry.resolve("test.xyz", &OpenArgs::read()).unwrap();
    assert_eq!(handler.format_name(), "marker");

    // the separately registered uppercase variant is untouched
    let upper = registry.resolve("test.XYZ", &OpenArgs::read()).unwrap();
    assert_eq!(upper.format_name(), "xyz");
}

#[test]
fn lookup_is_case_sensitive() {
    let mut registry = FormatRegistry::new();
    registry.register("abc", |_, _| Ok(Box::new(Marker) as Box<dyn FileHandler>));

    assert!(registry.resolve("test.abc", &OpenArgs::read()).is_ok());
    assert!(registry.resolve("test.ABC", &OpenArgs::read()).is_err());
}

#[test]
fn failing_constructor_surfaces_the_same_opaque_error() {
    let mut registry = FormatRegistry::new();
    registry.register("bad", |_, _| anyhow::bail!("constructor detail"));

    let error = registry.resolve("test.bad", &OpenArgs::read()).unwrap_err();
    let message = error.to_string();

    assert!(message.contains("not a supported file format"));
    // the root cause is logged, never propagated
    assert!(!message.contains("constructor detail"));
}

#[test]
fn registered_extensions_are_listed() {
    let registry = FormatRegistry::with_defaults();

    assert!(registry.is_registered("xyz"));
    assert!(registry.is_registered("XYZ"));
    assert!(!registry.is_registered("nc"));

    let extensions = registry.extensions();
    assert_eq!(extensions.len(), 8);
    assert!(extensions.contains(&"fdf"));
    assert!(extensions.contains(&"JSON"));
}

#[test]
fn handlers_receive_the_resolved_path() {
    let registry = FormatRegistry::with_defaults();
    let handler = registry
        .resolve("some/dir/structure.xyz", &OpenArgs::read())
        .unwrap();
    assert_eq!(handler.path(), Path::new("some/dir/structure.xyz"));
}
