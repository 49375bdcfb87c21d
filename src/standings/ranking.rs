use std::cmp::Ordering;

use crate::championship::entrant::count_position;
use crate::championship::Classification;

/// Sort key of a standings row: championship points, then number of wins,
/// second places, third places, and so on.
///
/// Ordering is ascending; rank with the greatest key first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankingKey {
    points: u32,
    position_counts: Vec<u32>,
}

impl RankingKey {
    /// Build the key from a finishing history, counting positions 1 to
    /// `max_finish_pos`.
    pub fn new(points: u32, history: &[Classification], max_finish_pos: usize) -> Self {
        let position_counts = (1..=max_finish_pos as u32)
            .map(|pos| count_position(history, pos))
            .collect();
        Self {
            points,
            position_counts,
        }
    }
}

/// Order rows by descending key. Rows with equal keys keep their input order.
pub fn rank<R>(mut rows: Vec<(R, RankingKey)>) -> Vec<R> {
    rows.sort_by(|a, b| compare_desc(&a.1, &b.1));
    rows.into_iter().map(|(row, _)| row).collect()
}

fn compare_desc(a: &RankingKey, b: &RankingKey) -> Ordering {
    b.cmp(a)
}
