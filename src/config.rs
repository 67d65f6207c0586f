use std::path::PathBuf;
use std::thread;

use crate::error::FlightError;

pub const DEFAULT_INPUT: &str = "AComp_Passenger_data_no_error.csv";
pub const DEFAULT_PARTITIONS: usize = 5;
const MAX_DEFAULT_WORKERS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Parallel,
    Sequential,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub partitions: usize,
    pub workers: usize,
    pub has_header: bool,
    pub strategy: Strategy,
    /// Fail the run instead of reporting a partial result.
    pub strict: bool,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            partitions: DEFAULT_PARTITIONS,
            workers: default_workers(),
            has_header: false,
            strategy: Strategy::Parallel,
            strict: false,
        }
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        if self.partitions == 0 {
            return Err(FlightError::InvalidConfig(
                "partitions must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(FlightError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT)
    }
}

/// Pool size when none is given: available cores plus four, capped at 32.
pub fn default_workers() -> usize {
    let cores = thread::available_parallelism().map_or(1, |n| n.get());
    (cores + 4).min(MAX_DEFAULT_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.partitions, 5);
        assert!(!config.has_header);
        assert_eq!(config.strategy, Strategy::Parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_pool_is_bounded() {
        let workers = default_workers();
        assert!((5..=MAX_DEFAULT_WORKERS).contains(&workers));
    }

    #[test]
    fn rejects_zero_partitions_and_workers() {
        let mut config = Config::new("flights.csv");
        config.partitions = 0;
        assert!(matches!(config.validate(), Err(FlightError::InvalidConfig(_))));

        let mut config = Config::new("flights.csv");
        config.workers = 0;
        assert!(matches!(config.validate(), Err(FlightError::InvalidConfig(_))));
    }
}
