//! StatAccumulator - Sums modifier coefficients across every selected source

use crate::modifier::{Coefficients, DefaultMap, ModifierRecord};
use crate::source::StatSource;
use crate::types::Attribute;
use tracing::trace;

/// Per-attribute coefficient sums collected from modifier sources
///
/// Each of the six coefficients is summed independently; combining them
/// into a value is left to [`super::StatValue`].
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    totals: DefaultMap<Attribute, Coefficients>,
    sources: Vec<String>,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a source and remember its id
    pub fn apply_source(&mut self, source: &dyn StatSource) {
        trace!(source = source.id(), "applying stat source");
        self.sources.push(source.id().to_string());
        source.apply(self);
    }

    /// Add every coefficient of a record
    pub fn add_record(&mut self, record: &ModifierRecord) {
        for (attribute, coefficients) in record.iter() {
            *self.totals.entry(attribute) += coefficients;
        }
    }

    /// Summed coefficients for an attribute, zero when nothing touched it
    pub fn get(&self, attribute: Attribute) -> Coefficients {
        self.totals.get(&attribute)
    }

    /// Ids of applied sources, in application order
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}
