use std::sync::Arc;

use futures::StreamExt;
use log::{debug, info};

use crate::common::{combine_reports, Chunk, Input, MapReduceApp, Output, TaskReport};
use crate::partition;

use super::worker_pool::WorkerPool;

pub struct Coordinator {}

impl Coordinator {
    /// Map every chunk on the pool, wait for all reports, then reduce.
    pub async fn start_pool(
        &self,
        input: Input,
        mr_app: Arc<dyn MapReduceApp>,
    ) -> anyhow::Result<Output> {
        let chunks = partition::chunks(&input.rows, input.partitions);
        let total = chunks.len();
        let pool = WorkerPool::new(input.workers, Arc::clone(&mr_app))?;
        info!(
            "mapping {} rows as {} chunks on {} workers",
            input.rows.len(),
            total,
            pool.size()
        );

        debug!("workers: {:?}", pool.worker_ids().collect::<Vec<_>>());

        let reports = map_all(pool, chunks).await?;
        debug!("collected {} map reports", reports.len());

        Ok(combine_reports(reports, mr_app.as_ref()))
    }
}

/// Runs every chunk on the pool and waits for all of their reports.
///
/// The pool is torn down off the async runtime on every path, including a
/// failed submission, because joining its threads blocks.
async fn map_all(pool: WorkerPool, chunks: Vec<Chunk>) -> anyhow::Result<Vec<TaskReport>> {
    let total = chunks.len();
    let reports = pool.reports();

    let mut submitted = Ok(());
    for chunk in chunks {
        submitted = pool.run_task(chunk).await;
        if submitted.is_err() {
            break;
        }
    }

    // barrier: nothing is reduced until every chunk has reported
    let reports: Vec<TaskReport> = match submitted {
        Ok(()) => reports.take(total).collect().await,
        Err(_) => Vec::new(),
    };

    tokio::task::spawn_blocking(move || pool.shutdown()).await?;
    submitted.map(|()| reports)
}
