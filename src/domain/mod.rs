// ============================================================
// DOMAIN LAYER
// ============================================================
// Core types and validation rules for the CSV-to-intent pipeline.
// No I/O, no async, no external collaborators.

pub mod error;
pub mod intent;
pub mod record;
pub mod report;

pub use error::{AppError, Result};
pub use intent::{IntentGroup, IntentPayload};
pub use record::{rule_parts, RawRecord, RejectedRecord, SubmissionRecord, ValidatedRecord};
pub use report::{BatchProgress, BatchResult, IngestReport, ParseDiagnostics, RejectedRow};
