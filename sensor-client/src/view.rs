use std::io::{self, BufRead, Write};

use sensor_api::models::SensorType;

use crate::form::{Field, FieldErrors, SensorForm};

/// Where the controller reports back to the user.
pub trait FormView {
    /// Inline messages, one per invalid field.
    fn show_field_errors(&mut self, errors: &FieldErrors);

    /// Blocking notification.
    fn alert(&mut self, message: &str);

    /// Leave the form for another route.
    fn navigate(&mut self, route: &str);
}

/// Renders everything as lines on a writer.
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> FormView for TerminalView<W> {
    fn show_field_errors(&mut self, errors: &FieldErrors) {
        for (field, message) in errors.iter() {
            self.line(&format!("  {}: {}", field.label(), message));
        }
    }

    fn alert(&mut self, message: &str) {
        self.line(&format!("[!] {message}"));
    }

    fn navigate(&mut self, route: &str) {
        self.line(&format!("-> {route}"));
    }
}

/// Asks for each of `fields` in turn and stores the answers in `form`.
/// Returns `false` when the input ends before every field was answered.
pub fn read_fields<R: BufRead, W: Write>(
    form: &mut SensorForm,
    fields: &[Field],
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    for field in fields {
        match field {
            Field::Tipo => {
                let options: Vec<_> = SensorType::ALL.iter().map(SensorType::as_str).collect();
                write!(output, "{} [{}]: ", field.label(), options.join(", "))?;
            }
            Field::StatusOperacional => write!(output, "{} [s/N]: ", field.label())?,
            _ => write!(output, "{}: ", field.label())?,
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        form.set(*field, line.trim_end_matches(['\r', '\n']));
    }

    Ok(true)
}
