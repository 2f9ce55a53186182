//! Unit Conversion
//!
//! Closed sets of mass and temperature units with fixed conversion factors.

mod mass;
mod temperature;

pub use mass::{convert, convert_mass, MassConversion, MassConversionInput, MassUnit};
pub use temperature::{TemperatureUnit, ABSOLUTE_ZERO_C};
