mod aggregator;
mod config;
mod event;
mod invoker;
mod observer;
mod record;
mod schema;
mod validation;

pub use aggregator::{RunAggregator, RunReport, RunTotals};
pub use config::{ClassifierConfig, DEFAULT_MODEL, DEFAULT_ROLE, MAX_ATTEMPTS};
pub use event::{validate_phase_order, validate_recorded_once, RunEvent};
pub use invoker::{CallOutcome, ModelInvoker, ModelResponse};
pub use observer::{NoopObserver, RunObserver};
pub use record::{ClassificationRecord, FailureDiagnostic, RecordBuilder, RecordStatus, ERROR_LABEL};
pub use schema::SchemaContract;
pub use validation::{validate_response, FailureKind, ValidatedFields, ValidationError};
