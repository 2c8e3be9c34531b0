//! timetraveler — discrete calendar time series generator.
//!
//! A series is produced by repeatedly advancing a starting point-in-time by
//! a fixed calendar increment, invoking a callback at each step with the
//! current step index and timestamp.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
