//! # The atomio crate
//!
//! Readers and writers for the file formats of a materials-science toolkit,
//! plus unit-aware physical constants.
//!
//! ## Overview
//!
//! Atomic structures turn up in whatever format the nearest simulation code
//! happens to speak. This crate reads and writes the common text formats
//! through one dispatch point, picking the handler from the file extension,
//! and coerces every structural format into the same [Geometry] struct.
//!
//! | Format                       | Extensions     | Content           |
//! | ---------------------------- | -------------- | ----------------- |
//! | [XyzFile](handlers::XyzFile)     | `xyz`, `XYZ`   | geometry          |
//! | [FdfFile](handlers::FdfFile)     | `fdf`, `FDF`   | geometry + cell   |
//! | [TableFile](handlers::TableFile) | `dat`, `DAT`   | numeric columns   |
//! | [JsonFile](handlers::JsonFile)   | `json`, `JSON` | geometry + cell   |
//!
//! Reading any of them is a one-liner:
//!
//! ```ignore
//! // pick the format from the extension and read the structure
//! let geometry = atomio::read_geometry("./data/water.xyz")?;
//! println!("{geometry}");
//! ```
//!
//! The dispatch table itself is ordinary data, so unknown formats can be
//! wired in at startup through [FormatRegistry], and anything registered
//! later for the same extension simply supersedes the earlier entry.
//!
//! ## Physical constants
//!
//! The [constant] module carries the usual suspects in SI units. They behave
//! exactly like the `f64` they wrap until a conversion is asked for:
//!
//! ```rust
//! use atomio::constant::SPEED_OF_LIGHT;
//!
//! assert_eq!(SPEED_OF_LIGHT * 2.0, 599584916.0);
//!
//! let c = SPEED_OF_LIGHT.to("Ang/ps").unwrap();
//! assert_eq!(c.unit(), "Ang/ps");
//! ```
//!
//! Unit labels are resolved by the [units] module, which also handles
//! compound expressions such as `eV/Ang` and `m^3/kg/s^2`.
//!
//! As an overview:
//! - The [registry] module owns extension-to-handler dispatch.
//! - The [handlers] module holds the per-format readers and writers and the
//!   [FileHandler] contract they share.
//! - The [geometry] module is the common structural data type.
//! - The [constant] and [units] modules cover unit-tagged values and the
//!   conversions between unit labels.
//!
//! All of the useful functionality from the handlers and the registry is
//! re-exported for convenience.

// Public facing modules
pub mod constant;
pub mod geometry;
pub mod handlers;
pub mod registry;
pub mod units;
pub mod utils;

// Re-exports of useful data structures
#[doc(inline)]
pub use crate::constant::PhysicalConstant;

#[doc(inline)]
pub use crate::geometry::Geometry;

#[doc(inline)]
pub use crate::handlers::{
    read_geometry, read_table, write_geometry, write_table, FileHandler, FileMode, OpenArgs,
};

#[doc(inline)]
pub use crate::registry::FormatRegistry;
