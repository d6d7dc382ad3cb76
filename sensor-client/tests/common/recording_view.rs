use sensor_client::{FieldErrors, FormView};

#[derive(Debug, Default)]
pub struct RecordingView {
    pub field_errors: Vec<FieldErrors>,
    pub alerts: Vec<String>,
    pub routes: Vec<String>,
}

impl FormView for RecordingView {
    fn show_field_errors(&mut self, errors: &FieldErrors) {
        self.field_errors.push(errors.clone());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, route: &str) {
        self.routes.push(route.to_string());
    }
}
