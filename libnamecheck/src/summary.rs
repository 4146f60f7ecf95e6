use crate::types::{Availability, LabeledResult};
use serde::Serialize;

/// Tri-state counts over one batch; they always sum to the batch length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub available: usize,
    pub taken: usize,
    pub unknown: usize,
}

impl Summary {
    pub fn of(rows: &[LabeledResult]) -> Self {
        rows.iter().fold(Self::default(), |mut s, row| {
            match row.result.available {
                Availability::Available => s.available += 1,
                Availability::Taken => s.taken += 1,
                Availability::Unknown => s.unknown += 1,
            }
            s
        })
    }

    pub fn total(&self) -> usize {
        self.available + self.taken + self.unknown
    }
}

/// Labels of rows whose provider throttled us, in batch order.
pub fn rate_limited_labels(rows: &[LabeledResult]) -> Vec<String> {
    rows.iter()
        .filter(|row| row.result.is_rate_limited())
        .map(|row| row.label.clone())
        .collect()
}
