use reqwest::StatusCode;

use crate::api::SensorClient;
use crate::error::Error;
use crate::form::{FieldErrors, SensorForm};
use crate::storage::{ACCESS_TOKEN_KEY, LocalStorage};
use crate::view::FormView;

pub const SUCCESS_MESSAGE: &str = "Sensor cadastrado com sucesso!";

/// Route of the sensor listing, opened after a successful registration.
pub const SENSORS_ROUTE: &str = "/sensores";

/// What a single submission ended in.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blocked before any request was made
    Invalid(FieldErrors),
    Created(StatusCode),
    /// The API answered with an error; `message` was alerted
    Rejected { status: StatusCode, message: String },
    /// Sent, but nothing came back
    NoResponse(Error),
    /// Never left the client
    RequestFailed(Error),
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }
}

/// Drives the registration form: validate, normalize, authenticate, send.
pub struct FormController<S: LocalStorage> {
    client: SensorClient,
    storage: S,
}

impl<S: LocalStorage> FormController<S> {
    pub fn new(client: SensorClient, storage: S) -> Self {
        Self { client, storage }
    }

    pub async fn submit<V: FormView>(&self, form: &SensorForm, view: &mut V) -> SubmitOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(errors) => {
                view.show_field_errors(&errors);
                return SubmitOutcome::Invalid(errors);
            }
        };

        tracing::debug!(payload = ?request, "Submitting sensor registration");

        let token = match self.storage.get_item(ACCESS_TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read {} from storage: {}", ACCESS_TOKEN_KEY, e);
                None
            }
        };
        if token.is_none() {
            tracing::warn!("No {} stored, sending request without a valid token", ACCESS_TOKEN_KEY);
        }

        match self.client.create_sensor(&request, token.as_deref()).await {
            Ok(status) => {
                tracing::info!(%status, tipo = %request.tipo, "Sensor registered");
                view.alert(SUCCESS_MESSAGE);
                view.navigate(SENSORS_ROUTE);
                SubmitOutcome::Created(status)
            }
            Err(e @ Error::Server { .. }) => {
                let status = e.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = e.user_message().unwrap_or_default();
                view.alert(&message);
                SubmitOutcome::Rejected { status, message }
            }
            Err(e @ Error::Request(_)) => {
                tracing::error!("Failed to set up sensor request: {}", e);
                SubmitOutcome::RequestFailed(e)
            }
            Err(e) => {
                tracing::error!("No response received for sensor request: {}", e);
                SubmitOutcome::NoResponse(e)
            }
        }
    }
}
