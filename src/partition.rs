use std::sync::Arc;

use crate::common::{Chunk, Row};

/// Rows per chunk for a partition target. Never zero, so even an input
/// shorter than `partitions` makes progress one row at a time.
pub fn chunk_size(total_rows: usize, partitions: usize) -> usize {
    (total_rows / partitions.max(1)).max(1)
}

/// Splits the table into contiguous chunks of `chunk_size` rows; the last
/// chunk takes whatever is left. The chunk count is driven by the size and can
/// exceed `partitions` when the rows don't divide evenly.
pub fn chunks(rows: &Arc<Vec<Row>>, partitions: usize) -> Vec<Chunk> {
    let total = rows.len();
    let size = chunk_size(total, partitions);

    (0..total)
        .step_by(size)
        .enumerate()
        .map(|(id, start)| Chunk::new(id, Arc::clone(rows), start..(start + size).min(total)))
        .collect()
}
