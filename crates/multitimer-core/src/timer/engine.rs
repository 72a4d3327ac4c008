//! Timer engine implementation.
//!
//! The engine owns the timer registry and is a wall-clock-based state
//! machine: it does not run threads of its own, and every entry point takes
//! the current time explicitly. The caller (normally the scheduler worker)
//! feeds it commands and periodic `tick()` calls.
//!
//! ## Edge detection
//!
//! Lifecycle events are detected by comparing freshly derived runtime
//! values against stored counters, never by counting ticks. A starved
//! scheduler that crosses several loop boundaries before its next tick
//! still emits one completion per boundary crossed, and a completion that
//! already fired never fires again until `reset` or a geometry-changing
//! `upsert` re-arms it.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = Engine::new();
//! let events = engine.apply(Command::Upsert { timer }, clock.now_ms());
//! // On a fixed cadence:
//! let events = engine.tick(clock.now_ms());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::pomodoro::next_phase;
use super::runtime::compute_runtime;
use super::state::{Direction, Phase, RuntimeSnapshot, TimerKind, TimerState, TimerStatus};
use crate::events::{stamp, Command, EngineEvent};

/// Registry of timers plus the command/tick state machine around it.
///
/// The registry keeps insertion order; snapshots and events iterate it in
/// that order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Engine {
    timers: Vec<TimerState>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine pre-populated with `timers` (rehydration path).
    pub fn with_timers(timers: Vec<TimerState>) -> Self {
        let mut engine = Self { timers };
        for timer in &mut engine.timers {
            normalize(timer);
        }
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timers(&self) -> &[TimerState] {
        &self.timers
    }

    pub fn get(&self, id: &str) -> Option<&TimerState> {
        self.timers.iter().find(|t| t.id == id)
    }

    /// Derived runtime of every registered timer at `now_ms`.
    pub fn runtime_by_id(&self, now_ms: u64) -> BTreeMap<String, RuntimeSnapshot> {
        self.timers
            .iter()
            .map(|t| (t.id.clone(), compute_runtime(t, now_ms)))
            .collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply one command at `now_ms`.
    ///
    /// Mutating commands are followed by a `snapshot` event; `lap` emits
    /// only its own event. Unknown ids are silent no-ops.
    pub fn apply(&mut self, command: Command, now_ms: u64) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        match command {
            Command::Init { timers } => {
                self.timers = timers;
                for timer in &mut self.timers {
                    normalize(timer);
                }
                events.push(EngineEvent::Ready { at: stamp(now_ms) });
            }
            Command::Upsert { timer } => self.upsert(timer, now_ms),
            Command::Remove { id } => self.timers.retain(|t| t.id != id),
            Command::Start { id } => {
                if let Some(timer) = self.find_mut(&id) {
                    timer.start(now_ms);
                }
            }
            Command::Pause { id } => {
                if let Some(timer) = self.find_mut(&id) {
                    timer.pause(now_ms);
                }
            }
            Command::Reset { id } => {
                if let Some(timer) = self.find_mut(&id) {
                    timer.reset();
                }
            }
            Command::StartAll => {
                for timer in &mut self.timers {
                    timer.start(now_ms);
                }
            }
            Command::PauseAll => {
                for timer in &mut self.timers {
                    timer.pause(now_ms);
                }
            }
            Command::ResetAll => {
                for timer in &mut self.timers {
                    timer.reset();
                }
            }
            Command::KillAll => self.timers.clear(),
            Command::Lap { id } => {
                if let Some(timer) = self.get(&id) {
                    if timer.kind == TimerKind::Stopwatch {
                        events.push(EngineEvent::Lap {
                            id,
                            elapsed_ms: timer.elapsed_ms(now_ms),
                            at: stamp(now_ms),
                        });
                    }
                }
                // Laps never mutate, so no follow-up snapshot.
                return events;
            }
        }
        events.push(EngineEvent::Snapshot {
            runtime_by_id: self.runtime_by_id(now_ms),
            at: stamp(now_ms),
        });
        events
    }

    /// Re-evaluate every timer at `now_ms`, emit lifecycle events for the
    /// boundaries crossed since the previous evaluation, and close with a
    /// `tick` snapshot.
    pub fn tick(&mut self, now_ms: u64) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        for timer in &mut self.timers {
            if timer.kind != TimerKind::CountdownTimer
                || timer.direction != Direction::Down
                || timer.duration_ms == 0
            {
                continue;
            }
            let runtime = compute_runtime(timer, now_ms);
            if timer.looping {
                // One event per boundary crossed, even when a single tick
                // crossed several.
                while timer.loops_completed < runtime.loops_completed {
                    timer.loops_completed += 1;
                    events.push(EngineEvent::Completed {
                        id: timer.id.clone(),
                        loops_completed: timer.loops_completed,
                        at: stamp(now_ms),
                    });
                }
            } else if runtime.status == TimerStatus::Completed && !timer.completed {
                timer.completed = true;
                timer.base_elapsed_ms = timer.duration_ms;
                timer.running_since_unix_ms = None;
                timer.loops_completed = 1;
                events.push(EngineEvent::Completed {
                    id: timer.id.clone(),
                    loops_completed: 1,
                    at: stamp(now_ms),
                });
                if timer.pomodoro.is_some() {
                    advance_phase(timer, now_ms, &mut events);
                }
            }
        }
        events.push(EngineEvent::Tick {
            runtime_by_id: self.runtime_by_id(now_ms),
            at: stamp(now_ms),
        });
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn find_mut(&mut self, id: &str) -> Option<&mut TimerState> {
        self.timers.iter_mut().find(|t| t.id == id)
    }

    /// Insert `incoming`, or merge it over the existing entry with the
    /// same id. Runtime fields and counters carry over from the existing
    /// entry; a geometry change (kind, direction, duration, loop flag)
    /// re-arms completion and rebases the stored loop count so stale
    /// boundaries neither double-fire nor fire spuriously.
    fn upsert(&mut self, incoming: TimerState, now_ms: u64) {
        match self.timers.iter_mut().find(|t| t.id == incoming.id) {
            Some(existing) => {
                let mut merged = incoming;
                merged.base_elapsed_ms = existing.base_elapsed_ms;
                merged.running_since_unix_ms = existing.running_since_unix_ms;
                merged.started = existing.started;
                merged.loops_completed = existing.loops_completed;
                merged.completed = existing.completed;
                normalize(&mut merged);
                let geometry_changed = merged.kind != existing.kind
                    || merged.direction != existing.direction
                    || merged.duration_ms != existing.duration_ms
                    || merged.looping != existing.looping;
                if geometry_changed {
                    merged.completed = false;
                    merged.loops_completed = compute_runtime(&merged, now_ms).loops_completed;
                }
                *existing = merged;
            }
            None => {
                let mut timer = incoming;
                normalize(&mut timer);
                self.timers.push(timer);
            }
        }
    }
}

/// Enforce the pomodoro structural invariants on one timer: pomodoro only
/// exists on countdown timers, which count down without looping, with
/// `duration_ms` synchronized to the active phase.
fn normalize(timer: &mut TimerState) {
    if timer.kind != TimerKind::CountdownTimer {
        timer.pomodoro = None;
        return;
    }
    let Some(config) = timer.pomodoro.as_mut() else {
        return;
    };
    if config.current_cycle == 0 {
        config.current_cycle = 1;
    }
    let duration = config.phase_duration_ms(config.current_phase);
    timer.direction = Direction::Down;
    timer.looping = false;
    timer.duration_ms = duration;
}

/// Move a pomodoro timer that just completed its phase to the next one.
fn advance_phase(timer: &mut TimerState, now_ms: u64, events: &mut Vec<EngineEvent>) {
    let Some(config) = timer.pomodoro.as_ref() else {
        return;
    };
    let next = next_phase(config);
    let auto_start = match next.phase {
        Phase::Work => config.auto_start_work,
        Phase::ShortBreak | Phase::LongBreak => config.auto_start_breaks,
    };
    if let Some(config) = timer.pomodoro.as_mut() {
        config.current_phase = next.phase;
        config.current_cycle = next.cycle;
    }
    timer.duration_ms = next.duration_ms;
    timer.base_elapsed_ms = 0;
    timer.running_since_unix_ms = None;
    timer.completed = false;
    timer.loops_completed = 0;
    events.push(EngineEvent::PomodoroPhaseChange {
        id: timer.id.clone(),
        phase: next.phase,
        cycle: next.cycle,
        at: stamp(now_ms),
    });
    if auto_start {
        timer.running_since_unix_ms = Some(now_ms);
        timer.started = true;
    }
}
