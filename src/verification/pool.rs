use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::comparator::Comparator;
use super::error::CompareError;
use crate::domain::{Assignment, AssignmentCompared};

/// Compares `entry` against every corpus document on the blocking pool.
///
/// At most `workers` comparisons run at once. Results are returned in completion order.
/// A comparison that fails or panics is logged and left out; it never aborts the others.
pub async fn compare_corpus(
    comparator: Arc<Comparator>,
    entry: Arc<Assignment>,
    corpus: Vec<Assignment>,
    workers: usize,
) -> Vec<AssignmentCompared> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks: JoinSet<(Uuid, Result<AssignmentCompared, CompareError>)> = JoinSet::new();
    let total = corpus.len();

    for present in corpus {
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };
        let comparator = Arc::clone(&comparator);
        let entry = Arc::clone(&entry);

        tasks.spawn_blocking(move || {
            let _permit = permit;
            (present.id, comparator.compare(&present, &entry))
        });
    }

    let mut results = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(compared))) => results.push(compared),
            Ok((present, Err(e))) => {
                warn!(present = %present, error = %e, "Comparison failed, skipping document");
            }
            Err(e) => {
                error!(error = %e, "Comparison task panicked, skipping document");
            }
        }
    }

    debug!(total, completed = results.len(), "Corpus comparison finished");
    results
}

/// Same as [`compare_corpus`] on the calling thread, in corpus order.
pub fn compare_corpus_sequential(
    comparator: &Comparator,
    entry: &Assignment,
    corpus: &[Assignment],
) -> Vec<AssignmentCompared> {
    corpus
        .iter()
        .filter_map(|present| match comparator.compare(present, entry) {
            Ok(compared) => Some(compared),
            Err(e) => {
                warn!(present = %present.id, error = %e, "Comparison failed, skipping document");
                None
            }
        })
        .collect()
}
