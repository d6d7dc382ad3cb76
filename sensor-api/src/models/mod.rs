mod error;
mod sensor;

pub use error::*;
pub use sensor::*;

/// Collection route of the sensor resource.
pub const SENSORS_PATH: &str = "/api/sensores/";
