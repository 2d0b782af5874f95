pub mod batch_submit;
pub mod ingest;
pub mod transform;
