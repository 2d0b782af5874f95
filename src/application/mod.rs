pub mod use_cases;

pub use use_cases::batch_submit::BatchSubmitter;
pub use use_cases::ingest::ingest;
pub use use_cases::transform::transform;
