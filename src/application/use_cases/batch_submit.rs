// ============================================================
// BATCH SUBMITTER
// ============================================================
// Sequential per-record dispatch: fixed pause between calls,
// cooperative cancellation polled between submissions, ordered
// results log, progress snapshots for whoever wants to render them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::domain::record::SubmissionRecord;
use crate::domain::report::{BatchProgress, BatchResult};
use crate::infrastructure::intent_api::IntentApi;

pub struct BatchSubmitter {
    api: Arc<dyn IntentApi>,
    delay: Duration,
}

impl BatchSubmitter {
    pub fn new(api: Arc<dyn IntentApi>, delay: Duration) -> Self {
        Self { api, delay }
    }

    /// Submit records in input order, at most once each. A per-record
    /// failure is recorded and the loop continues; setting `cancel`
    /// stops before the next send without rolling anything back.
    pub async fn submit_all(
        &self,
        records: &[SubmissionRecord],
        cancel: &AtomicBool,
        progress: Option<&UnboundedSender<BatchProgress>>,
    ) -> Vec<BatchResult> {
        let total = records.len();
        let mut results = Vec::with_capacity(total);
        let mut completed = 0usize;
        let mut failed = 0usize;

        for (index, record) in records.iter().enumerate() {
            if cancel.load(Ordering::SeqCst) {
                info!(submitted = results.len(), total, "Batch cancelled");
                break;
            }

            send_progress(
                progress,
                BatchProgress {
                    total,
                    completed,
                    failed,
                    current_index: index,
                    current: format!(
                        "Submitting {} ({}/{})",
                        record.conversation_name,
                        index + 1,
                        total
                    ),
                    last_outcome: None,
                },
            );

            let result = match self.api.create_intent(record).await {
                Ok(data) => {
                    completed += 1;
                    BatchResult {
                        conversation_name: record.conversation_name.clone(),
                        success: true,
                        error: None,
                        data: Some(data),
                    }
                }
                Err(err) => {
                    failed += 1;
                    warn!(
                        intent = %record.conversation_name,
                        error = %err,
                        "Intent submission failed"
                    );
                    BatchResult {
                        conversation_name: record.conversation_name.clone(),
                        success: false,
                        error: Some(err.to_string()),
                        data: None,
                    }
                }
            };

            send_progress(
                progress,
                BatchProgress {
                    total,
                    completed,
                    failed,
                    current_index: index,
                    current: format!("Done {}/{}", index + 1, total),
                    last_outcome: Some(result.clone()),
                },
            );
            results.push(result);

            if index + 1 < total {
                tokio::time::sleep(self.delay).await;
            }
        }

        results
    }
}

fn send_progress(sender: Option<&UnboundedSender<BatchProgress>>, snapshot: BatchProgress) {
    if let Some(sender) = sender {
        // Receiver going away must not stop the batch.
        let _ = sender.send(snapshot);
    }
}
