use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    Temperatura,
    Contador,
    Luminosidade,
    Umidade,
}

impl SensorType {
    /// Every selectable type, in the order the form lists them.
    pub const ALL: [SensorType; 4] = [
        SensorType::Temperatura,
        SensorType::Contador,
        SensorType::Luminosidade,
        SensorType::Umidade,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Temperatura => "Temperatura",
            SensorType::Contador => "Contador",
            SensorType::Luminosidade => "Luminosidade",
            SensorType::Umidade => "Umidade",
        }
    }
}

impl Display for SensorType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSensorType(pub String);

impl Display for UnknownSensorType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "unknown sensor type: {}", self.0)
    }
}

impl std::error::Error for UnknownSensorType {}

impl FromStr for SensorType {
    type Err = UnknownSensorType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SensorType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| UnknownSensorType(value.to_string()))
    }
}

/// Body of `POST /api/sensores/`.
///
/// Coordinates travel as the text the user typed; the backend owns their
/// numeric conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSensorRequest {
    /// Sensor category
    pub tipo: SensorType,
    /// Hardware address, `null` when not informed
    pub mac_address: Option<String>,
    /// Latitude as typed
    pub latitude: String,
    /// Longitude as typed
    pub longitude: String,
    /// Installation place description
    pub localizacao: String,
    /// Person in charge of the sensor
    pub responsavel: String,
    /// Unit of the measured quantity
    pub unidade_medida: String,
    /// Whether the sensor is operating
    pub status_operacional: bool,
    /// Free-form notes
    pub observacao: Option<String>,
}
