//! Physical constants with unit conversion
//!
//! Every constant is a numeric value tagged with the unit it is expressed in,
//! and the built-in set ships in SI units. The tag is metadata only, so in
//! arithmetic a constant behaves exactly like the `f64` it wraps.
//!
//! | Constant                 | Value            | Unit       |
//! | ------------------------ | ---------------- | ---------- |
//! | [SPEED_OF_LIGHT]         | 299792458        | m/s        |
//! | [PLANCK_CONSTANT]        | 6.62607004081e-34| J s        |
//! | [REDUCED_PLANCK_CONSTANT]| 1.05457180013e-34| J s        |
//! | [ELECTRON_MASS]          | 9.1093835611e-31 | kg         |
//! | [PROTON_MASS]            | 1.67262189821e-27| kg         |
//! | [GRAVITATIONAL_CONSTANT] | 6.6740831e-11    | m^3/kg/s^2 |
//!
//! Use a constant anywhere an ordinary number fits:
//!
//! ```rust
//! use atomio::constant::SPEED_OF_LIGHT;
//!
//! assert_eq!(SPEED_OF_LIGHT * 2.0, 599584916.0);
//! ```
//!
//! or convert it into whichever units the surrounding formula wants:
//!
//! ```rust
//! use atomio::constant::SPEED_OF_LIGHT;
//!
//! let c = SPEED_OF_LIGHT.to("Ang/ps").unwrap();
//! assert!((c.value() - 2997924.58).abs() < 1e-6);
//! assert_eq!(c.unit(), "Ang/ps");
//! ```

// internal modules
use crate::units;

// standard library
use std::borrow::Cow;
use std::ops::{Add, Div, Mul, Sub};

// external crates
use anyhow::Result;

/// An immutable numeric value tagged with its unit of measurement
///
/// Conversion never mutates in place, it hands back a new constant holding
/// the rescaled value and the requested unit:
///
/// ```rust
/// use atomio::constant::PhysicalConstant;
///
/// let m = PhysicalConstant::new(1.0, "m");
/// let nm = m.to("nm").unwrap();
/// assert!((nm.value() - 1e9).abs() < 1e-6);
/// assert_eq!(nm.unit(), "nm");
/// ```
///
/// Comparisons, like arithmetic, see only the numeric value.
#[derive(Debug, Clone)]
pub struct PhysicalConstant {
    value: f64,
    unit: Cow<'static, str>,
}

impl PhysicalConstant {
    /// A constant from a value expressed in `unit`
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: Cow::Owned(unit.into()),
        }
    }

    /// Const constructor for the built-in set
    pub const fn new_static(value: f64, unit: &'static str) -> Self {
        Self {
            value,
            unit: Cow::Borrowed(unit),
        }
    }

    /// The plain numeric value, expressed in [unit](Self::unit)
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit of the constant
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// The constant expressed in another unit
    ///
    /// Passing `None` requests no conversion at all and returns the constant
    /// as stored, which for the built-in set means SI units. Anything else is
    /// resolved to a multiplicative factor through the unit tables in
    /// [units](crate::units).
    ///
    /// An unresolvable unit fails only this call, the constant itself remains
    /// valid.
    pub fn to<'a>(&self, unit: impl Into<Option<&'a str>>) -> Result<Self> {
        self.to_with(units::conversion_factor, unit)
    }

    /// The constant expressed in another unit, through a caller-supplied
    /// conversion service
    ///
    /// `units` maps a `(from, to)` pair of labels to the factor that takes a
    /// value from the first to the second. [to](Self::to) is this with the
    /// built-in tables plugged in.
    pub fn to_with<'a, F>(&self, units: F, unit: impl Into<Option<&'a str>>) -> Result<Self>
    where
        F: Fn(&str, &str) -> Result<f64>,
    {
        match unit.into() {
            None => Ok(self.clone()),
            Some(target) => {
                let factor = units(&self.unit, target)?;
                Ok(Self {
                    value: self.value * factor,
                    unit: Cow::Owned(target.to_string()),
                })
            }
        }
    }
}

impl std::fmt::Display for PhysicalConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl From<PhysicalConstant> for f64 {
    fn from(constant: PhysicalConstant) -> f64 {
        constant.value
    }
}

impl PartialEq for PhysicalConstant {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<f64> for PhysicalConstant {
    fn eq(&self, other: &f64) -> bool {
        self.value == *other
    }
}

impl PartialEq<PhysicalConstant> for f64 {
    fn eq(&self, other: &PhysicalConstant) -> bool {
        *self == other.value
    }
}

impl PartialOrd for PhysicalConstant {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl PartialOrd<f64> for PhysicalConstant {
    fn partial_cmp(&self, other: &f64) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(other)
    }
}

impl PartialOrd<PhysicalConstant> for f64 {
    fn partial_cmp(&self, other: &PhysicalConstant) -> Option<std::cmp::Ordering> {
        self.partial_cmp(&other.value)
    }
}

// Arithmetic sees the numeric value only and always hands back a plain f64,
// the unit tag does not survive into derived quantities.
macro_rules! delegate_float_ops {
    ($($trait:ident, $method:ident, $op:tt);*) => {$(
        impl $trait<f64> for PhysicalConstant {
            type Output = f64;
            fn $method(self, rhs: f64) -> f64 {
                self.value $op rhs
            }
        }

        impl $trait<f64> for &PhysicalConstant {
            type Output = f64;
            fn $method(self, rhs: f64) -> f64 {
                self.value $op rhs
            }
        }

        impl $trait<PhysicalConstant> for f64 {
            type Output = f64;
            fn $method(self, rhs: PhysicalConstant) -> f64 {
                self $op rhs.value
            }
        }

        impl $trait<&PhysicalConstant> for f64 {
            type Output = f64;
            fn $method(self, rhs: &PhysicalConstant) -> f64 {
                self $op rhs.value
            }
        }

        impl $trait<PhysicalConstant> for PhysicalConstant {
            type Output = f64;
            fn $method(self, rhs: PhysicalConstant) -> f64 {
                self.value $op rhs.value
            }
        }
    )*};
}

delegate_float_ops! {
    Add, add, +;
    Sub, sub, -;
    Mul, mul, *;
    Div, div, /
}

/// Speed of light in vacuum [m/s]
pub const SPEED_OF_LIGHT: PhysicalConstant = PhysicalConstant::new_static(299792458.0, "m/s");

/// Planck constant [J s]
pub const PLANCK_CONSTANT: PhysicalConstant =
    PhysicalConstant::new_static(6.62607004081e-34, "J s");

/// Reduced Planck constant [J s]
pub const REDUCED_PLANCK_CONSTANT: PhysicalConstant =
    PhysicalConstant::new_static(1.05457180013e-34, "J s");

/// Electron rest mass [kg]
pub const ELECTRON_MASS: PhysicalConstant = PhysicalConstant::new_static(9.1093835611e-31, "kg");

/// Proton rest mass [kg]
pub const PROTON_MASS: PhysicalConstant = PhysicalConstant::new_static(1.67262189821e-27, "kg");

/// Gravitational constant [m^3/kg/s^2]
pub const GRAVITATIONAL_CONSTANT: PhysicalConstant =
    PhysicalConstant::new_static(6.6740831e-11, "m^3/kg/s^2");
