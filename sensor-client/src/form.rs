use std::fmt::{self, Display, Formatter};

use sensor_api::models::{CreateSensorRequest, SensorType};

pub const BLANK_MESSAGE: &str = "Não é permitido estar em branco.";
pub const INVALID_TYPE_MESSAGE: &str = "Tipo de sensor inválido.";
pub const INVALID_LATITUDE_MESSAGE: &str = "Latitude inválida";
pub const INVALID_LONGITUDE_MESSAGE: &str = "Longitude inválida";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Tipo,
    MacAddress,
    Latitude,
    Longitude,
    Localizacao,
    Responsavel,
    UnidadeMedida,
    Observacao,
    StatusOperacional,
}

impl Field {
    /// Form order.
    pub const ALL: [Field; 9] = [
        Field::Tipo,
        Field::MacAddress,
        Field::Latitude,
        Field::Longitude,
        Field::Localizacao,
        Field::Responsavel,
        Field::UnidadeMedida,
        Field::Observacao,
        Field::StatusOperacional,
    ];

    /// Payload key.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Tipo => "tipo",
            Field::MacAddress => "mac_address",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Localizacao => "localizacao",
            Field::Responsavel => "responsavel",
            Field::UnidadeMedida => "unidade_medida",
            Field::Observacao => "observacao",
            Field::StatusOperacional => "status_operacional",
        }
    }

    /// Text shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Tipo => "Tipo de Sensor",
            Field::Responsavel => "responsável",
            Field::Observacao => "Observação",
            Field::StatusOperacional => "Satus Operacional",
            other => other.name(),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First violated rule per field, kept in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(Field, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: Into<String>>(&mut self, field: Field, message: S) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
            self.errors.sort_by_key(|(field, _)| *field);
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.iter().map(|(field, _)| *field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Raw input state of the registration form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorForm {
    pub tipo: String,
    pub mac_address: String,
    pub latitude: String,
    pub longitude: String,
    pub localizacao: String,
    pub responsavel: String,
    pub unidade_medida: String,
    pub observacao: String,
    pub status_operacional: bool,
}

impl SensorForm {
    /// Checks every field and builds the request payload.
    ///
    /// An empty `mac_address` becomes `None`; everything else is forwarded as
    /// typed.
    pub fn validate(&self) -> Result<CreateSensorRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        let tipo = if self.tipo.is_empty() {
            errors.add(Field::Tipo, BLANK_MESSAGE);
            None
        } else {
            match self.tipo.parse::<SensorType>() {
                Ok(tipo) => Some(tipo),
                Err(_) => {
                    errors.add(Field::Tipo, INVALID_TYPE_MESSAGE);
                    None
                }
            }
        };

        if parse_float_prefix(&self.latitude).is_none() {
            errors.add(Field::Latitude, INVALID_LATITUDE_MESSAGE);
        }
        if parse_float_prefix(&self.longitude).is_none() {
            errors.add(Field::Longitude, INVALID_LONGITUDE_MESSAGE);
        }

        check_length(&mut errors, Field::Localizacao, &self.localizacao, 10, 100);
        check_length(&mut errors, Field::Responsavel, &self.responsavel, 1, 100);
        check_length(&mut errors, Field::UnidadeMedida, &self.unidade_medida, 1, 20);

        match tipo {
            Some(tipo) if errors.is_empty() => Ok(CreateSensorRequest {
                tipo,
                mac_address: Some(self.mac_address.clone()).filter(|mac| !mac.is_empty()),
                latitude: self.latitude.clone(),
                longitude: self.longitude.clone(),
                localizacao: self.localizacao.clone(),
                responsavel: self.responsavel.clone(),
                unidade_medida: self.unidade_medida.clone(),
                status_operacional: self.status_operacional,
                observacao: Some(self.observacao.clone()),
            }),
            _ => Err(errors),
        }
    }

    /// Writes a typed value into the field. The checkbox is ticked by
    /// `true`, `sim`, `s`, `yes`, `y`, `1` or `on`.
    pub fn set(&mut self, field: Field, value: &str) {
        let value = value.to_string();
        match field {
            Field::Tipo => self.tipo = value,
            Field::MacAddress => self.mac_address = value,
            Field::Latitude => self.latitude = value,
            Field::Longitude => self.longitude = value,
            Field::Localizacao => self.localizacao = value,
            Field::Responsavel => self.responsavel = value,
            Field::UnidadeMedida => self.unidade_medida = value,
            Field::Observacao => self.observacao = value,
            Field::StatusOperacional => {
                self.status_operacional = matches!(
                    value.trim().to_lowercase().as_str(),
                    "true" | "sim" | "s" | "yes" | "y" | "1" | "on"
                )
            }
        }
    }
}

/// Length as a browser counts it, in UTF-16 code units.
fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

fn check_length(errors: &mut FieldErrors, field: Field, value: &str, min: usize, max: usize) {
    let length = text_length(value);
    if length < min {
        errors.add(field, format!("Deve ter no mínimo {min} caracteres."));
    } else if length > max {
        errors.add(field, format!("Deve ter no máximo {max} caracteres."));
    }
}

/// Parses the longest leading decimal number, skipping leading whitespace
/// and byte order marks, the way `parseFloat` does. `None` when no digits
/// lead the text.
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    let text = value.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].replace("Infinity", "inf").parse().ok();
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SensorForm {
        SensorForm {
            tipo: "Temperatura".to_string(),
            mac_address: "00:1B:44:11:3A:B7".to_string(),
            latitude: "-22.9068".to_string(),
            longitude: "-43.1729".to_string(),
            localizacao: "Laboratório de redes, bloco B".to_string(),
            responsavel: "Maria".to_string(),
            unidade_medida: "°C".to_string(),
            observacao: String::new(),
            status_operacional: true,
        }
    }

    #[test]
    fn test_valid_form_builds_request() {
        let request = valid_form().validate().unwrap();

        assert_eq!(request.tipo, SensorType::Temperatura);
        assert_eq!(request.mac_address.as_deref(), Some("00:1B:44:11:3A:B7"));
        assert_eq!(request.latitude, "-22.9068");
        assert_eq!(request.observacao.as_deref(), Some(""));
        assert!(request.status_operacional);
    }

    #[test]
    fn test_empty_mac_address_becomes_none() {
        let form = SensorForm {
            mac_address: String::new(),
            ..valid_form()
        };

        assert_eq!(form.validate().unwrap().mac_address, None);
    }

    #[test]
    fn test_missing_tipo() {
        let form = SensorForm {
            tipo: String::new(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Tipo), Some(BLANK_MESSAGE));
    }

    #[test]
    fn test_unknown_tipo() {
        let form = SensorForm {
            tipo: "Pressão".to_string(),
            ..valid_form()
        };

        assert_eq!(form.validate().unwrap_err().get(Field::Tipo), Some(INVALID_TYPE_MESSAGE));
    }

    #[test]
    fn test_coordinates_must_parse() {
        for bad in ["", "abc", ".", "-", "  ", "e5", "N22"] {
            let form = SensorForm {
                latitude: bad.to_string(),
                longitude: bad.to_string(),
                ..valid_form()
            };

            let errors = form.validate().unwrap_err();
            assert_eq!(errors.get(Field::Latitude), Some(INVALID_LATITUDE_MESSAGE), "{bad:?}");
            assert_eq!(errors.get(Field::Longitude), Some(INVALID_LONGITUDE_MESSAGE), "{bad:?}");
        }
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("12.5"), Some(12.5));
        assert_eq!(parse_float_prefix("  -3.25"), Some(-3.25));
        assert_eq!(parse_float_prefix("12.5abc"), Some(12.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("1,5"), Some(1.0));
        assert_eq!(parse_float_prefix("+.e1"), None);
        assert_eq!(parse_float_prefix("NaN"), None);
        assert_eq!(parse_float_prefix("\u{FEFF}1.5"), Some(1.5));
        assert_eq!(parse_float_prefix("\u{FEFF} \t-7"), Some(-7.0));
        assert_eq!(parse_float_prefix("\u{FEFF}"), None);
    }

    #[test]
    fn test_localizacao_bounds() {
        let check = |length: usize| {
            SensorForm {
                localizacao: "a".repeat(length),
                ..valid_form()
            }
            .validate()
            .err()
            .and_then(|errors| errors.get(Field::Localizacao).map(str::to_string))
        };

        assert_eq!(check(9).as_deref(), Some("Deve ter no mínimo 10 caracteres."));
        assert_eq!(check(10), None);
        assert_eq!(check(100), None);
        assert_eq!(check(101).as_deref(), Some("Deve ter no máximo 100 caracteres."));
    }

    #[test]
    fn test_responsavel_and_unidade_bounds() {
        let responsavel = |length: usize| {
            SensorForm {
                responsavel: "r".repeat(length),
                ..valid_form()
            }
            .validate()
            .err()
            .and_then(|errors| errors.get(Field::Responsavel).map(str::to_string))
        };
        assert_eq!(responsavel(0).as_deref(), Some("Deve ter no mínimo 1 caracteres."));
        assert_eq!(responsavel(1), None);
        assert_eq!(responsavel(100), None);
        assert_eq!(responsavel(101).as_deref(), Some("Deve ter no máximo 100 caracteres."));

        let unidade = |length: usize| {
            SensorForm {
                unidade_medida: "u".repeat(length),
                ..valid_form()
            }
            .validate()
            .err()
            .and_then(|errors| errors.get(Field::UnidadeMedida).map(str::to_string))
        };
        assert_eq!(unidade(0).as_deref(), Some("Deve ter no mínimo 1 caracteres."));
        assert_eq!(unidade(1), None);
        assert_eq!(unidade(20), None);
        assert_eq!(unidade(21).as_deref(), Some("Deve ter no máximo 20 caracteres."));
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // Ten accented letters are ten units; one emoji is two.
        let form = SensorForm {
            localizacao: "ç".repeat(10),
            unidade_medida: "😀".repeat(10),
            ..valid_form()
        };
        assert!(form.validate().is_ok());

        let form = SensorForm {
            unidade_medida: "😀".repeat(11),
            ..valid_form()
        };
        assert_eq!(
            form.validate().unwrap_err().get(Field::UnidadeMedida),
            Some("Deve ter no máximo 20 caracteres.")
        );
    }

    #[test]
    fn test_errors_reported_in_form_order() {
        let errors = SensorForm::default().validate().unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![
                Field::Tipo,
                Field::Latitude,
                Field::Longitude,
                Field::Localizacao,
                Field::Responsavel,
                Field::UnidadeMedida,
            ]
        );
    }

    #[test]
    fn test_set_checkbox() {
        let mut form = SensorForm::default();
        form.set(Field::StatusOperacional, "Sim");
        assert!(form.status_operacional);
        form.set(Field::StatusOperacional, "");
        assert!(!form.status_operacional);
    }
}
