use std::io;
use std::process::ExitCode;

use sensor_client::settings::Settings;
use sensor_client::storage::ACCESS_TOKEN_KEY;
use sensor_client::view::read_fields;
use sensor_client::{
    Field, FileStorage, FormController, LocalStorage, SensorClient, SensorForm, SubmitOutcome,
    TerminalView,
};

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logger.default_filter().into()),
        )
        .init();

    let mut storage = FileStorage::new(&settings.storage.path);
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["set-token", token] => storage.set_item(ACCESS_TOKEN_KEY, token).await,
        ["clear-token"] => storage.remove_item(ACCESS_TOKEN_KEY).await,
        [] => return run_form(&settings, storage).await,
        _ => {
            eprintln!("usage: sensor-form [set-token <token> | clear-token]");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Failed to update {}: {}", storage.path().display(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run_form(settings: &Settings, storage: FileStorage) -> ExitCode {
    let client = match settings.api.timeout() {
        Some(timeout) => SensorClient::with_timeout(&settings.api.base_url, timeout),
        None => SensorClient::new(&settings.api.base_url),
    };
    let controller = FormController::new(client, storage);

    let mut view = TerminalView::new(io::stdout());
    let mut input = io::stdin().lock();
    let mut form = SensorForm::default();
    let mut pending: Vec<Field> = Field::ALL.to_vec();

    println!("Cadastro de Sensores");

    loop {
        match read_fields(&mut form, &pending, &mut input, &mut io::stdout()) {
            Ok(true) => {}
            Ok(false) => return ExitCode::FAILURE,
            Err(e) => {
                tracing::error!("Failed to read form input: {}", e);
                return ExitCode::FAILURE;
            }
        }

        match controller.submit(&form, &mut view).await {
            SubmitOutcome::Invalid(errors) => pending = errors.fields().collect(),
            SubmitOutcome::Created(_) => return ExitCode::SUCCESS,
            _ => return ExitCode::FAILURE,
        }
    }
}
