//! Stopwatch state machine for recording work sessions
//!
//! The timer never reads a clock: every event carries the instant at which
//! it happened, and [`transition`] is a pure function of the current state
//! and the event. Pausing does not stop the clock source; it accumulates
//! the paused time, which is excluded from the recorded duration.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A finished work session, as submitted to the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Active time in whole minutes
    pub duration: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running {
        started_at: DateTime<Utc>,
        paused: Duration,
    },
    Paused {
        started_at: DateTime<Utc>,
        paused_at: DateTime<Utc>,
        paused: Duration,
    },
    Stopped {
        started_at: DateTime<Utc>,
        stopped_at: DateTime<Utc>,
        paused: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Start(DateTime<Utc>),
    Pause(DateTime<Utc>),
    Resume(DateTime<Utc>),
    Stop(DateTime<Utc>),
    /// Periodic refresh of the displayed elapsed time
    Tick(DateTime<Utc>),
    Save { notes: Option<String> },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEffect {
    /// Active time to display
    Elapsed(Duration),
    /// Session ready to be sent to the API
    Submit(SessionRecord),
    /// The timer and its notes were cleared
    Cleared,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("cannot {event} a timer that is {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

impl TimerState {
    fn name(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running { .. } => "running",
            TimerState::Paused { .. } => "paused",
            TimerState::Stopped { .. } => "stopped",
        }
    }

    /// Active (non-paused) time as observed at `now`
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        let elapsed = match *self {
            TimerState::Idle => Duration::zero(),
            TimerState::Running { started_at, paused } => now - started_at - paused,
            TimerState::Paused {
                started_at,
                paused_at,
                paused,
            } => paused_at - started_at - paused,
            TimerState::Stopped {
                started_at,
                stopped_at,
                paused,
            } => stopped_at - started_at - paused,
        };
        elapsed.max(Duration::zero())
    }
}

impl TimerEvent {
    fn name(&self) -> &'static str {
        match self {
            TimerEvent::Start(_) => "start",
            TimerEvent::Pause(_) => "pause",
            TimerEvent::Resume(_) => "resume",
            TimerEvent::Stop(_) => "stop",
            TimerEvent::Tick(_) => "tick",
            TimerEvent::Save { .. } => "save",
            TimerEvent::Reset => "reset",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whole minutes of active time, never less than one
pub fn billable_minutes(active: Duration) -> i32 {
    let minutes = active.num_seconds().max(0) / 60;
    i32::try_from(minutes).unwrap_or(i32::MAX).max(1)
}

/// Render a duration as `HH:MM:SS`
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_seconds = elapsed.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Apply one event to the timer
///
/// `Save` leaves the timer stopped so a failed submission can be retried;
/// the caller sends `Reset` once the API has accepted the record.
pub fn transition(
    state: TimerState,
    event: TimerEvent,
) -> Result<(TimerState, Vec<TimerEffect>), TimerError> {
    let invalid = |state: &TimerState, event: &TimerEvent| TimerError::InvalidTransition {
        state: state.name(),
        event: event.name(),
    };

    let next = match (&state, &event) {
        (TimerState::Idle, TimerEvent::Start(at)) => TimerState::Running {
            started_at: *at,
            paused: Duration::zero(),
        },
        (TimerState::Running { started_at, paused }, TimerEvent::Pause(at)) => {
            TimerState::Paused {
                started_at: *started_at,
                paused_at: *at,
                paused: *paused,
            }
        }
        (
            TimerState::Paused {
                started_at,
                paused_at,
                paused,
            },
            TimerEvent::Resume(at),
        ) => TimerState::Running {
            started_at: *started_at,
            paused: *paused + (*at - *paused_at).max(Duration::zero()),
        },
        (TimerState::Running { started_at, paused }, TimerEvent::Stop(at)) => {
            TimerState::Stopped {
                started_at: *started_at,
                stopped_at: *at,
                paused: *paused,
            }
        }
        (
            TimerState::Paused {
                started_at,
                paused_at,
                paused,
            },
            TimerEvent::Stop(at),
        ) => TimerState::Stopped {
            started_at: *started_at,
            stopped_at: *at,
            paused: *paused + (*at - *paused_at).max(Duration::zero()),
        },
        (_, TimerEvent::Tick(at)) => {
            return Ok((state, vec![TimerEffect::Elapsed(state.elapsed_at(*at))]));
        }
        (
            TimerState::Stopped {
                started_at,
                stopped_at,
                ..
            },
            TimerEvent::Save { notes },
        ) => {
            let record = SessionRecord {
                start_time: *started_at,
                end_time: *stopped_at,
                duration: billable_minutes(state.elapsed_at(*stopped_at)),
                notes: notes.clone().filter(|n| !n.trim().is_empty()),
            };
            return Ok((state, vec![TimerEffect::Submit(record)]));
        }
        (_, TimerEvent::Reset) => {
            return Ok((TimerState::Idle, vec![TimerEffect::Cleared]));
        }
        _ => return Err(invalid(&state, &event)),
    };

    let elapsed = match event {
        TimerEvent::Start(at)
        | TimerEvent::Pause(at)
        | TimerEvent::Resume(at)
        | TimerEvent::Stop(at) => next.elapsed_at(at),
        _ => Duration::zero(),
    };

    Ok((next, vec![TimerEffect::Elapsed(elapsed)]))
}
