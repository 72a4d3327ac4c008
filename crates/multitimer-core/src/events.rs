//! Command/event boundary between the engine and its host.
//!
//! Both directions are tagged unions so hosts in any language can speak the
//! contract: `{"type": "start", "id": "..."}` in, `{"type": "completed",
//! ...}` out. Events carry an `at` stamp derived from the engine's own
//! clock reading, so replaying a command log reproduces identical events.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, RuntimeSnapshot, TimerState};

/// Host-to-engine commands. Every command is idempotent or safely
/// repeatable; unknown ids are silent no-ops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    /// Replace the entire registry (cold start / rehydrate).
    Init { timers: Vec<TimerState> },
    /// Insert a timer or merge new configuration over an existing one.
    Upsert { timer: TimerState },
    Remove { id: String },
    Start { id: String },
    Pause { id: String },
    Reset { id: String },
    StartAll,
    PauseAll,
    ResetAll,
    /// Clear the registry.
    KillAll,
    /// Record a lap on a stopwatch without mutating it.
    Lap { id: String },
}

/// Engine-to-host events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EngineEvent {
    /// Engine is initialized: emitted once at worker startup and once per
    /// `init` command.
    Ready { at: DateTime<Utc> },
    /// Full runtime map, emitted synchronously after a mutating command.
    Snapshot {
        runtime_by_id: BTreeMap<String, RuntimeSnapshot>,
        at: DateTime<Utc>,
    },
    /// Full runtime map, emitted once per scheduler cycle.
    Tick {
        runtime_by_id: BTreeMap<String, RuntimeSnapshot>,
        at: DateTime<Utc>,
    },
    /// A countdown reached its duration. For looping timers this fires
    /// once per wrap, carrying the cumulative count.
    Completed {
        id: String,
        loops_completed: u64,
        at: DateTime<Utc>,
    },
    Lap {
        id: String,
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    PomodoroPhaseChange {
        id: String,
        phase: Phase,
        cycle: u32,
        at: DateTime<Utc>,
    },
    /// Unrecoverable internal fault. Hosts should treat the engine
    /// instance as dead and re-initialize.
    Error { message: String, at: DateTime<Utc> },
}

/// Event stamp for an engine clock reading.
pub(crate) fn stamp(now_ms: u64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(now_ms as i64).unwrap_or_default()
}
