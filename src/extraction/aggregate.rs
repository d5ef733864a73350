//! Merging of per-cell observations into the canonical payload.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::Observation;
use crate::codes::{self, CodeClass};
use crate::models::{ExtraShift, NightShift, Position, SchedulePayload};

/// Accumulates classified observations for one parse call.
///
/// Night observations grow a worker set per (position, date); extra
/// observations are appended with no deduplication. The aggregator is
/// local to one parse, no state crosses calls.
#[derive(Debug, Default)]
pub struct ShiftAggregator {
    nights: BTreeMap<(Position, NaiveDate), BTreeSet<String>>,
    extras: Vec<ExtraShift>,
}

impl ShiftAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and classifies one observation, routing it into the
    /// night groups or the extra list. Blank and unclassified codes are
    /// dropped.
    pub fn observe(&mut self, observation: &Observation) {
        let code = codes::normalize(&observation.code);
        match codes::classify(&code) {
            CodeClass::Night => {
                self.nights
                    .entry((observation.position, observation.date))
                    .or_default()
                    .insert(observation.name.clone());
            }
            CodeClass::Extra => {
                self.extras.push(ExtraShift {
                    name: observation.name.clone(),
                    date: observation.date,
                    code,
                    position: observation.position,
                });
            }
            CodeClass::Blank | CodeClass::Unclassified => {}
        }
    }

    /// Materializes the accumulated groups into the output payload.
    pub fn finish(self, source: &str) -> SchedulePayload {
        let night_shifts = self
            .nights
            .into_iter()
            .map(|((position, date), workers)| {
                NightShift::new(position, date, workers.into_iter().collect(), source)
            })
            .collect();
        SchedulePayload {
            night_shifts,
            extra_shifts: self.extras,
        }
    }
}

/// Runs every observation through a fresh aggregator.
pub fn aggregate(observations: &[Observation], source: &str) -> SchedulePayload {
    let mut aggregator = ShiftAggregator::new();
    for observation in observations {
        aggregator.observe(observation);
    }
    aggregator.finish(source)
}
