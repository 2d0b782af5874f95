pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ingest, transform, BatchSubmitter};
pub use domain::{
    AppError, BatchProgress, BatchResult, IngestReport, IntentPayload, ParseDiagnostics,
    RawRecord, Result, SubmissionRecord, ValidatedRecord,
};
pub use infrastructure::config::Settings;
pub use infrastructure::csv::CsvReader;
pub use infrastructure::intent_api::{IntentApi, IntentApiClient};
