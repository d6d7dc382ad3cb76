use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use sensor_api::models::{CreateSensorRequest, ErrorDetail, SENSORS_PATH};

use crate::error::{Error, Result};

/// Authorization header value. A missing token is sent as the literal `null`.
pub fn bearer_value(token: Option<&str>) -> String {
    format!("Bearer {}", token.unwrap_or("null"))
}

/// HTTP client for the sensor resource of the API.
#[derive(Debug, Clone)]
pub struct SensorClient {
    http_client: Client,
    base_url: String,
}

impl SensorClient {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Same as [`SensorClient::new`] but gives up on a request after `timeout`.
    pub fn with_timeout<S: Into<String>>(base_url: S, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    pub fn sensors_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SENSORS_PATH)
    }

    /// Sends one creation request. Only 2xx counts as success; any other status
    /// becomes [`Error::Server`] carrying the `detail` of the body.
    pub async fn create_sensor(
        &self,
        request: &CreateSensorRequest,
        token: Option<&str>,
    ) -> Result<StatusCode> {
        let response = self
            .http_client
            .post(self.sensors_url())
            .header(AUTHORIZATION, bearer_value(token))
            .json(request)
            .send()
            .await
            .map_err(Error::from_transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(status);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(status = %status, "Failed to read rejection body: {}", e);
                Default::default()
            }
        };
        tracing::error!(
            status = %status,
            body = %String::from_utf8_lossy(&body),
            "Server rejected sensor registration"
        );

        let detail = match ErrorDetail::from_body(&body) {
            Some(error) => error.detail,
            None => status.to_string(),
        };

        Err(Error::Server { status, detail })
    }
}
