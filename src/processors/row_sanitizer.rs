use crate::models::Dataset;
use crate::utils::coordinates::is_blank;
use tracing::debug;

/// Drop rows where every cell is blank, keeping the order of the rest.
///
/// Returns the number of rows removed.
pub fn eliminate_empty_rows(dataset: &mut Dataset) -> usize {
    let before = dataset.len();
    dataset.retain_rows(|row| row.iter().any(|cell| !is_blank(cell)));
    let dropped = before - dataset.len();

    if dropped > 0 {
        debug!(dropped, remaining = dataset.len(), "Dropped empty rows");
    }
    dropped
}
