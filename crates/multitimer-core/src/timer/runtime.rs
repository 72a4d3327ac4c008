//! Pure runtime calculator.
//!
//! Maps persisted timer state plus a point in time to a derived
//! [`RuntimeSnapshot`]. No mutation, no side effects: the same
//! `(state, now)` always yields the same snapshot, which is what makes the
//! scheduler's edge detection idempotent.

use super::state::{Direction, RuntimeSnapshot, TimerKind, TimerState, TimerStatus};

/// Derive the runtime values of `timer` at `now_ms`.
pub fn compute_runtime(timer: &TimerState, now_ms: u64) -> RuntimeSnapshot {
    let elapsed = timer.elapsed_ms(now_ms);

    if timer.kind == TimerKind::Stopwatch || timer.direction == Direction::Up {
        // Up-counting timers display raw elapsed and never complete.
        return RuntimeSnapshot {
            status: live_status(timer, elapsed),
            elapsed_ms: elapsed,
            display_ms: elapsed,
            remaining_ms: None,
            loops_completed: 0,
        };
    }

    let duration = timer.duration_ms;
    if duration == 0 {
        // Zero-duration countdown: a no-op display of zero.
        return RuntimeSnapshot {
            status: live_status(timer, elapsed),
            elapsed_ms: elapsed,
            display_ms: 0,
            remaining_ms: Some(0),
            loops_completed: 0,
        };
    }

    if timer.looping {
        let loops = elapsed / duration;
        let remaining = duration - elapsed % duration;
        return RuntimeSnapshot {
            status: live_status(timer, elapsed),
            elapsed_ms: elapsed,
            display_ms: remaining,
            remaining_ms: Some(remaining),
            loops_completed: loops,
        };
    }

    if elapsed >= duration {
        // Terminal: elapsed reports clamped to the target.
        return RuntimeSnapshot {
            status: TimerStatus::Completed,
            elapsed_ms: duration,
            display_ms: 0,
            remaining_ms: Some(0),
            loops_completed: 1,
        };
    }

    let remaining = duration - elapsed;
    RuntimeSnapshot {
        status: live_status(timer, elapsed),
        elapsed_ms: elapsed,
        display_ms: remaining,
        remaining_ms: Some(remaining),
        loops_completed: 0,
    }
}

fn live_status(timer: &TimerState, elapsed: u64) -> TimerStatus {
    if timer.is_running() {
        TimerStatus::Running
    } else if elapsed > 0 || timer.started {
        TimerStatus::Paused
    } else {
        TimerStatus::Idle
    }
}
