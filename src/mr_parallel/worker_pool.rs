use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, ensure, Context};
use async_channel::{Receiver, Sender};
use futures_lite::future;
use log::{debug, trace, warn};
use uuid::Uuid;

use crate::common::{run_map_task, Chunk, MapReduceApp, TaskReport};

/// Fixed set of worker threads pulling map jobs off a shared bounded queue.
///
/// Every job sends exactly one `TaskReport` on the report channel, in
/// completion order. Dropping the pool closes the queue and joins the threads.
pub struct WorkerPool {
    workers: Vec<Worker>,
    sender: Sender<Job>,
    reports_tx: Sender<TaskReport>,
    reports_rx: Receiver<TaskReport>,
    app: Arc<dyn MapReduceApp>,
}

type Job = Box<dyn FnOnce(&str) + Send + 'static>;

impl WorkerPool {
    pub fn new(size: usize, app: Arc<dyn MapReduceApp>) -> anyhow::Result<WorkerPool> {
        ensure!(size > 0, "worker pool needs at least one worker");

        let (sender, receiver) = async_channel::bounded(size);
        let (reports_tx, reports_rx) = async_channel::unbounded();
        let workers = (0..size)
            .map(|_| Worker::new(receiver.clone()))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(WorkerPool {
            workers,
            sender,
            reports_tx,
            reports_rx,
            app,
        })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn worker_ids(&self) -> impl Iterator<Item = &str> {
        self.workers.iter().map(|worker| worker.id.as_str())
    }

    pub fn reports(&self) -> Receiver<TaskReport> {
        self.reports_rx.clone()
    }

    async fn execute<F>(&self, f: F) -> anyhow::Result<()>
    where
        F: FnOnce(&str) + Send + 'static,
    {
        let job = Box::new(f);
        self.sender
            .send(job)
            .await
            .map_err(|_| anyhow!("worker pool is shut down"))
    }

    pub async fn run_task(&self, chunk: Chunk) -> anyhow::Result<()> {
        let app = Arc::clone(&self.app);
        let reports = self.reports_tx.clone();
        self.execute(move |worker_id| {
            trace!("worker {} maps chunk {} ({} rows)", worker_id, chunk.id, chunk.len());
            let report = TaskReport {
                chunk_id: chunk.id,
                worker_id: worker_id.to_string(),
                result: run_map_task(app.as_ref(), &chunk),
            };
            if future::block_on(reports.send(report)).is_err() {
                warn!("report for chunk {} dropped, nobody is collecting", chunk.id);
            }
        })
        .await
    }

    /// Stops accepting jobs, lets queued ones finish, and joins every thread.
    pub fn shutdown(mut self) {
        self.close_and_join();
    }

    /// Refuses further jobs; queued ones still run.
    pub fn close(&self) {
        self.sender.close();
    }

    fn close_and_join(&mut self) {
        self.close();
        for worker in self.workers.drain(..) {
            if let Some(thread) = worker.thread {
                if thread.join().is_err() {
                    warn!("worker {} exited with a panic", worker.id);
                }
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.close_and_join();
    }
}

pub struct Worker {
    pub id: String,
    thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    fn new(receiver: Receiver<Job>) -> anyhow::Result<Worker> {
        let id = Uuid::new_v4().to_string();
        let worker_id = id.clone();
        let thread = thread::Builder::new()
            .name(format!("mr-worker-{}", &id[..8]))
            .spawn(move || {
                // recv fails once the queue is closed and drained
                while let Ok(job) = future::block_on(receiver.recv()) {
                    job(&worker_id);
                }
                debug!("worker {} stopped", worker_id);
            })
            .context("failed to spawn worker thread")?;

        Ok(Worker {
            id,
            thread: Some(thread),
        })
    }
}
