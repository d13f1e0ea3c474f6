// Reading and writing the supported file formats

// crate under test
use atomio::registry::FormatRegistry;
use atomio::{read_geometry, read_table, write_table, Geometry, OpenArgs};

// standard library
use std::fs;
use std::path::PathBuf;

// external crates
use rstest::rstest;

/// Scratch path in the system temp directory
fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(name)
}

fn water() -> Geometry {
    Geometry::new(
        vec!["O".to_string(), "H".to_string(), "H".to_string()],
        vec![
            [0.0, 0.0, 0.1173],
            [0.0, 0.7572, -0.4692],
            [0.0, -0.7572, -0.4692],
        ],
    )
    .unwrap()
}

#[test]
fn reads_the_xyz_sample() {
    let geometry = read_geometry("data/water.xyz").unwrap();

    assert_eq!(geometry.natoms(), 3);
    assert_eq!(geometry.species, vec!["O", "H", "H"]);
    assert_eq!(geometry.coordinates[2], [0.0, -0.7572, -0.4692]);
    assert_eq!(geometry.cell, None);
}

#[test]
fn reads_the_fdf_sample() {
    let geometry = read_geometry("data/silicon.fdf").unwrap();

    assert_eq!(geometry.natoms(), 2);
    assert_eq!(geometry.species, vec!["Si", "Si"]);
    assert_eq!(geometry.coordinates[1], [1.3575, 1.3575, 1.3575]);

    let cell = geometry.cell.unwrap();
    assert_eq!(cell[0], [0.0, 2.715, 2.715]);
    assert_eq!(cell[2], [2.715, 2.715, 0.0]);
}

#[rstest]
#[case("atomio_roundtrip.xyz")]
#[case("atomio_roundtrip.fdf")]
#[case("atomio_roundtrip.json")]
fn molecular_geometries_round_trip(#[case] name: &str) {
    let path = scratch(name);
    let original = water();

    atomio::write_geometry(&path, &original).unwrap();
    let read_back = read_geometry(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(read_back, original);
}

#[rstest]
#[case("atomio_periodic.fdf")]
#[case("atomio_periodic.json")]
fn periodic_geometries_round_trip(#[case] name: &str) {
    let path = scratch(name);
    let original = Geometry::new(
        vec!["Si".to_string(), "Si".to_string()],
        vec![[0.0, 0.0, 0.0], [1.3575, 1.3575, 1.3575]],
    )
    .unwrap()
    .with_cell([
        [0.0, 2.715, 2.715],
        [2.715, 0.0, 2.715],
        [2.715, 2.715, 0.0],
    ]);

    atomio::write_geometry(&path, &original).unwrap();
    let read_back = read_geometry(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(read_back, original);
}

#[test]
fn reads_the_table_sample_column_wise() {
    let columns = read_table("data/results.dat").unwrap();

    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0], vec![1.0, 2.0, 3.0]);
    assert_eq!(columns[1][0], 0.42);
    assert_eq!(columns[2][2], 0.05);
}

#[test]
fn table_write_layout_matches_the_sample() {
    let path = scratch("atomio_layout.dat");
    let columns = vec![
        vec![1.0, 2.0, 3.0],
        vec![0.42, 0.37, 0.11],
        vec![0.01, 0.025, 0.05],
    ];

    let registry = FormatRegistry::with_defaults();
    let handler = registry
        .resolve(&path, &OpenArgs::write().with_option("comment", "energy flux error"))
        .unwrap();
    handler.write_data(&columns).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(written, fs::read_to_string("data/results.dat").unwrap());
}

#[test]
fn table_columns_round_trip() {
    let path = scratch("atomio_columns.dat");
    let columns = vec![vec![1.5, -2.25, 1e-8], vec![4.0, 5.5, 6.125]];

    write_table(&path, &columns).unwrap();
    let read_back = read_table(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(read_back, columns);
}

#[test]
fn ragged_columns_are_rejected_on_write() {
    let path = scratch("atomio_ragged.dat");
    let columns = vec![vec![1.0, 2.0], vec![3.0]];

    let error = write_table(&path, &columns).unwrap_err();
    assert!(error.to_string().contains("equal length"));
}

#[test]
fn formats_refuse_content_they_cannot_store() {
    let registry = FormatRegistry::with_defaults();

    let table = registry.resolve("results.dat", &OpenArgs::read()).unwrap();
    let error = table.read_geometry().unwrap_err();
    assert!(error.to_string().contains("does not store geometry data"));

    let xyz = registry.resolve("structure.xyz", &OpenArgs::read()).unwrap();
    let error = xyz.read_data().unwrap_err();
    assert!(error.to_string().contains("does not store column data"));
}

#[test]
fn writing_requires_write_mode() {
    let registry = FormatRegistry::with_defaults();
    let handler = registry
        .resolve(scratch("atomio_readonly.xyz"), &OpenArgs::read())
        .unwrap();

    let error = handler.write_geometry(&water()).unwrap_err();
    assert!(error.to_string().contains("not opened for writing"));
}

#[test]
fn truncated_xyz_files_are_rejected() {
    let path = scratch("atomio_truncated.xyz");
    fs::write(&path, "5\ntoo few atoms\nH 0.0 0.0 0.0\n").unwrap();

    let error = read_geometry(&path).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(error.to_string().contains("Expected 5 atom entries"));
}

#[test]
fn fdf_rejects_unresolved_species_indices() {
    let path = scratch("atomio_badspecies.fdf");
    fs::write(
        &path,
        "%block AtomicCoordinatesAndAtomicSpecies\n 0.0 0.0 0.0 2\n%endblock\n",
    )
    .unwrap();

    let error = read_geometry(&path).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(error.to_string().contains("no ChemicalSpeciesLabel entry"));
}

#[test]
fn geometry_display_is_a_summary() {
    let rendered = water().to_string();

    assert!(rendered.contains("atoms: 3"));
    assert!(rendered.contains("species: O, H"));
    assert!(rendered.contains("molecule"));
}
