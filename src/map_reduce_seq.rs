use async_trait::async_trait;

use crate::common::{
    combine_reports, run_map_task, Input, MapReduce, MapReduceApp, Output, TaskReport,
};
use crate::partition;

/// Runs every map task in turn on the calling thread.
pub struct SequentialMapReduce {
    input: Input,
    mr_app: Box<dyn MapReduceApp>,
}

impl SequentialMapReduce {
    pub fn run_sync(self) -> Output {
        let reports: Vec<TaskReport> = partition::chunks(&self.input.rows, self.input.partitions)
            .iter()
            .map(|chunk| TaskReport {
                chunk_id: chunk.id,
                worker_id: "main".to_string(),
                result: run_map_task(self.mr_app.as_ref(), chunk),
            })
            .collect();

        combine_reports(reports, self.mr_app.as_ref())
    }
}

#[async_trait]
impl MapReduce for SequentialMapReduce {
    fn new(input: Input, mr_app: Box<dyn MapReduceApp>) -> Self {
        Self { input, mr_app }
    }

    async fn run(self) -> anyhow::Result<Output> {
        Ok(self.run_sync())
    }
}
