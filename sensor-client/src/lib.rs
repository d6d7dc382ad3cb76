pub mod api;
pub mod controller;
pub mod error;
pub mod form;
pub mod settings;
pub mod storage;
pub mod view;

pub use api::SensorClient;
pub use controller::{FormController, SubmitOutcome};
pub use error::{Error, Result};
pub use form::{Field, FieldErrors, SensorForm};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
pub use view::{FormView, TerminalView};
