//! Timer data model.
//!
//! A [`TimerState`] holds configuration plus the minimal runtime fields the
//! engine needs to derive everything else: an accumulated elapsed base and
//! an absolute start stamp. Elapsed time is never stored as a running
//! counter -- it is recomputed from these fields on every read, which keeps
//! timers correct across process suspension and scheduler jitter.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerKind {
    CountdownTimer,
    Stopwatch,
}

/// Count direction for countdown timers. Stopwatches always count up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

/// Derived status of a timer at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Pomodoro session settings attached to a countdown timer.
///
/// `current_cycle` is 1-based: cycle N means the Nth pomodoro of the
/// running sequence. A long break is due after the work phase whose cycle
/// is a multiple of `long_break_interval`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroConfig {
    pub work_duration_ms: u64,
    pub short_break_duration_ms: u64,
    pub long_break_duration_ms: u64,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    #[serde(default = "default_cycle")]
    pub current_cycle: u32,
    #[serde(default)]
    pub current_phase: Phase,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_work: bool,
}

fn default_long_break_interval() -> u32 {
    4
}
fn default_cycle() -> u32 {
    1
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_duration_ms: 25 * 60 * 1000,
            short_break_duration_ms: 5 * 60 * 1000,
            long_break_duration_ms: 15 * 60 * 1000,
            long_break_interval: default_long_break_interval(),
            current_cycle: default_cycle(),
            current_phase: Phase::Work,
            auto_start_breaks: false,
            auto_start_work: false,
        }
    }
}

impl PomodoroConfig {
    /// Configured duration of the given phase.
    pub fn phase_duration_ms(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_duration_ms,
            Phase::ShortBreak => self.short_break_duration_ms,
            Phase::LongBreak => self.long_break_duration_ms,
        }
    }
}

/// One registered timer: host-supplied configuration plus engine-owned
/// runtime fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Opaque identifier, stable for the timer's lifetime.
    pub id: String,
    /// Display name; the engine never interprets it.
    #[serde(default)]
    pub label: String,
    pub kind: TimerKind,
    #[serde(default)]
    pub direction: Direction,
    /// Target duration; relevant only to countdown timers counting down.
    #[serde(default)]
    pub duration_ms: u64,
    /// A looping countdown wraps at its duration instead of terminating.
    #[serde(rename = "loop", default)]
    pub looping: bool,
    /// Elapsed time accumulated while not running.
    #[serde(default)]
    pub base_elapsed_ms: u64,
    /// Absolute start stamp; `Some` iff the timer is running.
    #[serde(default)]
    pub running_since_unix_ms: Option<u64>,
    /// Whether the timer was ever started since the last reset.
    #[serde(default)]
    pub started: bool,
    /// Wrap boundaries observed so far. Edge-detection memory, not a
    /// tick-incremented counter.
    #[serde(default)]
    pub loops_completed: u64,
    /// One-shot completion guard for non-looping countdowns.
    #[serde(rename = "completedFlag", default)]
    pub completed: bool,
    #[serde(rename = "pomodoroConfig", default)]
    pub pomodoro: Option<PomodoroConfig>,
}

impl TimerState {
    /// New idle countdown timer counting down from `duration_ms`.
    pub fn countdown(id: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            kind: TimerKind::CountdownTimer,
            direction: Direction::Down,
            duration_ms,
            looping: false,
            base_elapsed_ms: 0,
            running_since_unix_ms: None,
            started: false,
            loops_completed: 0,
            completed: false,
            pomodoro: None,
        }
    }

    /// New idle stopwatch.
    pub fn stopwatch(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            kind: TimerKind::Stopwatch,
            direction: Direction::Up,
            duration_ms: 0,
            looping: false,
            base_elapsed_ms: 0,
            running_since_unix_ms: None,
            started: false,
            loops_completed: 0,
            completed: false,
            pomodoro: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running_since_unix_ms.is_some()
    }

    /// Elapsed time at `now_ms`, derived from the stored base plus the
    /// in-progress running interval. Negative deltas clamp to zero.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.running_since_unix_ms {
            Some(since) => self
                .base_elapsed_ms
                .saturating_add(now_ms.saturating_sub(since)),
            None => self.base_elapsed_ms,
        }
    }

    /// Begin running at `now_ms`. No-op while already running or after a
    /// terminal completion.
    pub(crate) fn start(&mut self, now_ms: u64) {
        if self.completed || self.running_since_unix_ms.is_some() {
            return;
        }
        self.running_since_unix_ms = Some(now_ms);
        self.started = true;
    }

    /// Fold the running interval into the elapsed base and stop. No-op
    /// while not running.
    pub(crate) fn pause(&mut self, now_ms: u64) {
        if let Some(since) = self.running_since_unix_ms.take() {
            self.base_elapsed_ms = self
                .base_elapsed_ms
                .saturating_add(now_ms.saturating_sub(since));
        }
    }

    /// Return to pristine: zero elapsed, no running stamp, counters and
    /// flags cleared. Pomodoro phase/cycle are configuration and survive.
    pub(crate) fn reset(&mut self) {
        self.base_elapsed_ms = 0;
        self.running_since_unix_ms = None;
        self.started = false;
        self.loops_completed = 0;
        self.completed = false;
    }
}

/// Derived per-timer runtime values at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSnapshot {
    pub status: TimerStatus,
    pub elapsed_ms: u64,
    /// What a host would render: elapsed for up-counting timers,
    /// remaining for down-counting ones.
    pub display_ms: u64,
    /// `None` for timers without a meaningful remaining value.
    pub remaining_ms: Option<u64>,
    pub loops_completed: u64,
}
