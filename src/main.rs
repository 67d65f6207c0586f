mod common;
mod config;
mod error;
mod loader;
mod map_reduce_apps;
mod map_reduce_seq;
mod mr_parallel;
mod partition;
mod selector;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use log::{error, info};

use common::{Input, MapReduce, Output};
use config::{Config, Strategy, DEFAULT_INPUT, DEFAULT_PARTITIONS};
use error::FlightError;
use map_reduce_apps::FlightCount;
use map_reduce_seq::SequentialMapReduce;
use mr_parallel::ParallelMapReduce;
use selector::TopPassenger;

/// Finds the passenger with the most flights in a CSV of flight records.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Flight records, one row per flight, passenger id in the first column
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Target number of chunks to split the rows into
    #[arg(short, long, default_value_t = DEFAULT_PARTITIONS)]
    partitions: usize,

    /// Worker threads [default: available cores + 4, at most 32]
    #[arg(short, long)]
    workers: Option<usize>,

    /// Skip the first line of the input
    #[arg(long)]
    has_header: bool,

    /// Map chunks one after another on the main thread
    #[arg(long)]
    sequential: bool,

    /// Exit with an error if any chunk fails instead of reporting partial counts
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new(self.input);
        config.partitions = self.partitions;
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        config.has_header = self.has_header;
        config.strict = self.strict;
        if self.sequential {
            config.strategy = Strategy::Sequential;
        }
        config
    }
}

async fn run(config: &Config) -> anyhow::Result<TopPassenger> {
    config.validate()?;

    let path = config.input.clone();
    let has_header = config.has_header;
    let rows = tokio::task::spawn_blocking(move || loader::load_rows(&path, has_header)).await??;
    info!("loaded {} rows from {:?}", rows.len(), config.input);

    let input = Input {
        rows: Arc::new(rows),
        partitions: config.partitions,
        workers: config.workers,
    };
    let output = match config.strategy {
        Strategy::Parallel => {
            ParallelMapReduce::new(input, Box::new(FlightCount {}))
                .run()
                .await?
        }
        Strategy::Sequential => {
            SequentialMapReduce::new(input, Box::new(FlightCount {}))
                .run()
                .await?
        }
    };

    check_failed_chunks(&output, config.strict)?;

    Ok(selector::top_passenger(&output.counts)?)
}

/// Failed chunks are fatal under `strict`; otherwise the partial result goes
/// ahead with a summary logged at `error`, which the default filter shows.
fn check_failed_chunks(output: &Output, strict: bool) -> Result<(), FlightError> {
    if output.failed_chunks == 0 {
        return Ok(());
    }
    let failed = FlightError::FailedChunks {
        failed: output.failed_chunks,
        total: output.chunks,
    };
    if strict {
        return Err(failed);
    }
    error!("{}, flight counts are partial", failed);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let config = Cli::parse().into_config();
    let top = run(&config).await?;
    println!("{}", top);

    Ok(())
}
