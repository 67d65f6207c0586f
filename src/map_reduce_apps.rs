use crate::common::{Chunk, FrequencyMap, MapReduceApp};
use crate::error::TaskError;

/// Counts rows per passenger id (first field).
pub struct FlightCount {}

impl MapReduceApp for FlightCount {
    fn map(&self, chunk: &Chunk) -> Result<FrequencyMap, TaskError> {
        let mut flights = FrequencyMap::new();
        for (row, fields) in chunk.rows().iter().enumerate() {
            let passenger_id = fields.first().ok_or(TaskError::MissingField {
                chunk: chunk.id,
                row,
            })?;
            *flights.entry(passenger_id.clone()).or_insert(0) += 1;
        }
        Ok(flights)
    }

    fn reduce(&self, mut acc: FrequencyMap, other: FrequencyMap) -> FrequencyMap {
        for (passenger_id, count) in other {
            *acc.entry(passenger_id).or_insert(0) += count;
        }
        acc
    }
}
