#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::io::Write;
use timetraveler::domain::config::TravelerConfig;
use timetraveler::domain::error::TravelerError;
use timetraveler::domain::traveler::Step;
use timetraveler::ports::series_sink::SeriesSink;

pub fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_time(NaiveTime::MIN)
}

pub fn daily_config(starts_at: &str, steps: i64) -> TravelerConfig {
    TravelerConfig {
        starts_at: starts_at.into(),
        steps: steps.into(),
        time_units: "days".to_string(),
        time_scale: Some(1),
    }
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Sink that records steps in memory, optionally failing once full.
pub struct RecordingSink {
    pub steps: Vec<Step>,
    pub finished: bool,
    pub fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            finished: false,
            fail_after: None,
        }
    }

    pub fn failing_after(limit: usize) -> Self {
        Self {
            steps: Vec::new(),
            finished: false,
            fail_after: Some(limit),
        }
    }
}

impl SeriesSink for RecordingSink {
    fn record(&mut self, step: &Step) -> Result<(), TravelerError> {
        if let Some(limit) = self.fail_after {
            if self.steps.len() >= limit {
                return Err(TravelerError::Io(std::io::Error::other("sink full")));
            }
        }
        self.steps.push(*step);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TravelerError> {
        self.finished = true;
        Ok(())
    }
}
