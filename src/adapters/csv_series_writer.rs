//! CSV series output adapter.

use std::io::Write;

use crate::domain::calendar;
use crate::domain::error::TravelerError;
use crate::domain::traveler::Step;
use crate::ports::series_sink::SeriesSink;

/// Writes a series as CSV: a `step,time` header, one row per step.
///
/// Midnight-precision timestamps render as `YYYY-MM-DD`, anything else as
/// the full ISO date-time.
pub struct CsvSeriesWriter<W: Write> {
    writer: csv::Writer<W>,
    wrote_header: bool,
}

impl<W: Write> CsvSeriesWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
            wrote_header: false,
        }
    }

    fn ensure_header(&mut self) -> Result<(), TravelerError> {
        if !self.wrote_header {
            self.writer.write_record(["step", "time"])?;
            self.wrote_header = true;
        }
        Ok(())
    }
}

impl<W: Write> SeriesSink for CsvSeriesWriter<W> {
    fn record(&mut self, step: &Step) -> Result<(), TravelerError> {
        self.ensure_header()?;
        self.writer.write_record([
            step.step.to_string(),
            calendar::format_timestamp(step.time),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TravelerError> {
        // An empty series still gets its header.
        self.ensure_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
