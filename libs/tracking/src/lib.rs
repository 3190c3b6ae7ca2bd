//! Time-tracking domain logic for the Smore time tracker
//!
//! This crate holds the storage-independent pieces of the application:
//! the aggregation engine that turns per-day project totals into chart
//! series, and the stopwatch state machine that produces the session
//! records submitted to the API.

pub mod aggregation;
pub mod timer;

pub use aggregation::{Chart, DenseCell, DurationRow, ProjectTotal, Segment, Series, build_chart};
pub use timer::{SessionRecord, TimerEffect, TimerError, TimerEvent, TimerState, transition};
