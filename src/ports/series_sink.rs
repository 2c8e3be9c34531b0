//! Series output port trait.

use crate::domain::error::TravelerError;
use crate::domain::traveler::Step;

/// Destination for generated series rows.
pub trait SeriesSink {
    /// Record one step of the series.
    fn record(&mut self, step: &Step) -> Result<(), TravelerError>;

    /// Complete the series, flushing any buffered output.
    fn finish(&mut self) -> Result<(), TravelerError>;
}
