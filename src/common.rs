use async_trait::async_trait;
use std::{
    any::Any,
    collections::HashMap,
    ops::Range,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use crate::error::TaskError;

/// One input record, fields in file order.
pub type Row = Vec<String>;
/// {passenger_id: flights}
pub type FrequencyMap = HashMap<String, usize>;

pub struct Input {
    pub rows: Arc<Vec<Row>>,
    /// target number of chunks, see `partition::chunks`
    pub partitions: usize,
    /// pool size, ignored by the sequential strategy
    pub workers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Output {
    pub counts: FrequencyMap,
    pub chunks: usize,
    pub failed_chunks: usize,
}

/// A contiguous window over the shared row table.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: usize,
    rows: Arc<Vec<Row>>,
    range: Range<usize>,
}

impl Chunk {
    pub fn new(id: usize, rows: Arc<Vec<Row>>, range: Range<usize>) -> Self {
        debug_assert!(range.end <= rows.len());
        Self { id, rows, range }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows[self.range.clone()]
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }
}

/// What one map task delivers at the barrier.
#[derive(Debug)]
pub struct TaskReport {
    pub chunk_id: usize,
    pub worker_id: String,
    pub result: Result<FrequencyMap, TaskError>,
}

pub trait MapReduceApp: Send + Sync {
    fn map(&self, chunk: &Chunk) -> Result<FrequencyMap, TaskError>;
    /// Must be associative and commutative.
    fn reduce(&self, acc: FrequencyMap, other: FrequencyMap) -> FrequencyMap;
}

#[async_trait]
pub trait MapReduce {
    fn new(input: Input, mr_app: Box<dyn MapReduceApp>) -> Self;
    async fn run(self) -> anyhow::Result<Output>;
}

/// Runs one map task, turning a panic inside the app into a `TaskError`.
pub fn run_map_task(mr_app: &dyn MapReduceApp, chunk: &Chunk) -> Result<FrequencyMap, TaskError> {
    panic::catch_unwind(AssertUnwindSafe(|| mr_app.map(chunk))).unwrap_or_else(|payload| {
        Err(TaskError::Panicked {
            chunk: chunk.id,
            message: panic_message(payload.as_ref()),
        })
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Folds finished reports into one `Output`, dropping failed chunks.
pub fn combine_reports(
    reports: impl IntoIterator<Item = TaskReport>,
    mr_app: &dyn MapReduceApp,
) -> Output {
    reports
        .into_iter()
        .fold(Output::default(), |mut out, report| {
            out.chunks += 1;
            match report.result {
                Ok(counts) => {
                    let acc = std::mem::take(&mut out.counts);
                    out.counts = mr_app.reduce(acc, counts);
                }
                Err(err) => {
                    log::error!(
                        "chunk {} (worker {}) excluded: {}",
                        report.chunk_id,
                        report.worker_id,
                        err
                    );
                    out.failed_chunks += 1;
                }
            }
            out
        })
}
