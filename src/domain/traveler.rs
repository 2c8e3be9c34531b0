//! The time traveler: cursor state, validation, stepping, and the run loop.

use chrono::NaiveDateTime;

use crate::domain::calendar::{self, TimeUnit};
use crate::domain::config::{ConfigValue, TravelerConfig};
use crate::domain::error::TravelerError;

/// The traveler's mutable position: elapsed step count and current time.
///
/// `time` is `None` only when `starts_at` failed to coerce into a timestamp;
/// stepping keeps it `None` in that case while the step counter still moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cursor {
    pub step: i64,
    pub time: Option<NaiveDateTime>,
}

/// The value handed to the run callback: the cursor before advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Step {
    pub step: i64,
    pub time: NaiveDateTime,
}

/// A stateful stepper over a discrete calendar time series.
///
/// Construction never fails; configuration problems are reported lazily by
/// [`validate`](TimeTraveler::validate) and fail a [`run`](TimeTraveler::run)
/// before any callback fires. `starts_at` is an immutable snapshot — the
/// cursor owns its own timestamp and each step reassigns a fresh value, so a
/// `Step` retained from the callback stays frozen at that step.
#[derive(Debug, Clone)]
pub struct TimeTraveler {
    starts_at: ConfigValue,
    steps: ConfigValue,
    time_units: String,
    time_scale: i64,
    current: Cursor,
}

impl TimeTraveler {
    pub fn new(config: TravelerConfig) -> Self {
        let time = coerce_start(&config.starts_at);
        TimeTraveler {
            starts_at: config.starts_at,
            steps: config.steps,
            time_units: config.time_units,
            time_scale: match config.time_scale {
                Some(scale) if scale != 0 => scale,
                _ => 1,
            },
            current: Cursor { step: 0, time },
        }
    }

    /// The configured start, coerced to a timestamp. `None` if invalid.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        coerce_start(&self.starts_at)
    }

    pub fn current(&self) -> Cursor {
        self.current
    }

    pub fn time_scale(&self) -> i64 {
        self.time_scale
    }

    pub fn time_units(&self) -> &str {
        &self.time_units
    }

    /// Check every configuration rule and return one message per violation.
    ///
    /// Rules run independently and in a fixed order: start timestamp first,
    /// then the step count. Empty result means the configuration is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if coerce_start(&self.starts_at).is_none() {
            errors.push("starts_at must be a valid ISO date".to_string());
        }
        if integral_steps(&self.steps).is_none() {
            errors.push("steps must be an integer".to_string());
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Advance the cursor one step forward. Performs no validation.
    pub fn step_forward(&mut self) -> Result<(), TravelerError> {
        self.advance(1)
    }

    /// Advance the cursor one step backward. Performs no validation.
    pub fn step_backward(&mut self) -> Result<(), TravelerError> {
        self.advance(-1)
    }

    fn advance(&mut self, direction: i64) -> Result<(), TravelerError> {
        let unit: TimeUnit = self.time_units.parse()?;
        let amount = direction * self.time_scale;
        if let Some(time) = self.current.time {
            let shifted = calendar::shift(time, amount, unit)
                .ok_or(TravelerError::TimestampOutOfRange { amount, unit })?;
            self.current.time = Some(shifted);
        }
        self.current.step += direction;
        Ok(())
    }

    /// Drive a full synchronous iteration of exactly `steps` intervals.
    ///
    /// Fails fast with [`TravelerError::InvalidTraveler`] before any callback
    /// invocation if validation reports violations. Otherwise the callback
    /// fires once per interval with the pre-advance cursor, so the first
    /// invocation carries step 0 and the configured start. A non-positive
    /// step count performs zero iterations. The cursor keeps its final
    /// position, so a second call continues from where this one stopped.
    pub fn run<F>(&mut self, mut callback: F) -> Result<(), TravelerError>
    where
        F: FnMut(Step),
    {
        let reasons = self.validate();
        if !reasons.is_empty() {
            return Err(TravelerError::InvalidTraveler { reasons });
        }
        let count = integral_steps(&self.steps).unwrap_or(0);
        for _ in 0..count {
            // validate() confirmed starts_at coerces, and stepping never
            // clears a present time, so the cursor always carries one here.
            let Some(time) = self.current.time else { break };
            callback(Step {
                step: self.current.step,
                time,
            });
            self.advance(1)?;
        }
        Ok(())
    }

    /// Asynchronous variant of [`run`](TimeTraveler::run): same iteration
    /// order and cursor semantics, deferred delivery of the same result.
    pub async fn run_async<F>(&mut self, callback: F) -> Result<(), TravelerError>
    where
        F: FnMut(Step),
    {
        self.run(callback)
    }
}

/// Construct a traveler from `config` and run it to completion.
pub fn travel<F>(config: TravelerConfig, callback: F) -> Result<(), TravelerError>
where
    F: FnMut(Step),
{
    TimeTraveler::new(config).run(callback)
}

fn coerce_start(value: &ConfigValue) -> Option<NaiveDateTime> {
    match value {
        ConfigValue::Timestamp(time) => Some(*time),
        ConfigValue::Text(text) => calendar::parse_timestamp(text),
        _ => None,
    }
}

fn integral_steps(value: &ConfigValue) -> Option<i64> {
    match value {
        ConfigValue::Integer(count) => Some(*count),
        ConfigValue::Float(count)
            if count.is_finite()
                && count.fract() == 0.0
                && *count >= i64::MIN as f64
                && *count <= i64::MAX as f64 =>
        {
            Some(*count as i64)
        }
        _ => None,
    }
}
