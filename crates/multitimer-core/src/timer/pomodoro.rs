//! Pomodoro phase resolver.
//!
//! Pure function from the current pomodoro position to the next one.
//! The cycle counter is 1-based and advances so that it always names the
//! current pomodoro: it bumps when a long break begins (the sequence that
//! earned it is over) and when a short break hands back to work (the next
//! pomodoro of the running sequence begins). Returning from a long break
//! keeps the counter, which the long-break entry already advanced.

use super::state::{Phase, PomodoroConfig};

/// Resolved next position of a pomodoro sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub phase: Phase,
    pub cycle: u32,
    pub duration_ms: u64,
}

/// Resolve the phase that follows the config's current position.
pub fn next_phase(config: &PomodoroConfig) -> PhaseTransition {
    match config.current_phase {
        Phase::Work => {
            // Interval 0 would stall the sequence; treat it as 1.
            let interval = config.long_break_interval.max(1);
            if config.current_cycle % interval == 0 {
                PhaseTransition {
                    phase: Phase::LongBreak,
                    cycle: config.current_cycle.saturating_add(1),
                    duration_ms: config.long_break_duration_ms,
                }
            } else {
                PhaseTransition {
                    phase: Phase::ShortBreak,
                    cycle: config.current_cycle,
                    duration_ms: config.short_break_duration_ms,
                }
            }
        }
        Phase::ShortBreak => PhaseTransition {
            phase: Phase::Work,
            cycle: config.current_cycle.saturating_add(1),
            duration_ms: config.work_duration_ms,
        },
        Phase::LongBreak => PhaseTransition {
            phase: Phase::Work,
            cycle: config.current_cycle,
            duration_ms: config.work_duration_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at(phase: Phase, cycle: u32) -> PomodoroConfig {
        PomodoroConfig {
            current_phase: phase,
            current_cycle: cycle,
            ..PomodoroConfig::default()
        }
    }

    #[test]
    fn work_goes_to_short_break_mid_sequence() {
        for cycle in [1, 2, 3, 5, 6, 7] {
            let next = next_phase(&config_at(Phase::Work, cycle));
            assert_eq!(next.phase, Phase::ShortBreak);
            assert_eq!(next.cycle, cycle);
            assert_eq!(next.duration_ms, 5 * 60 * 1000);
        }
    }

    #[test]
    fn work_goes_to_long_break_on_interval_multiples() {
        for cycle in [4, 8, 12] {
            let next = next_phase(&config_at(Phase::Work, cycle));
            assert_eq!(next.phase, Phase::LongBreak);
            assert_eq!(next.cycle, cycle + 1);
            assert_eq!(next.duration_ms, 15 * 60 * 1000);
        }
    }

    #[test]
    fn short_break_advances_to_the_next_pomodoro() {
        let next = next_phase(&config_at(Phase::ShortBreak, 2));
        assert_eq!(next.phase, Phase::Work);
        assert_eq!(next.cycle, 3);
        assert_eq!(next.duration_ms, 25 * 60 * 1000);
    }

    #[test]
    fn long_break_keeps_the_already_advanced_cycle() {
        let next = next_phase(&config_at(Phase::LongBreak, 5));
        assert_eq!(next.phase, Phase::Work);
        assert_eq!(next.cycle, 5);
    }

    #[test]
    fn four_work_completions_yield_three_shorts_then_a_long() {
        let mut config = config_at(Phase::Work, 1);
        let mut breaks = Vec::new();
        for _ in 0..4 {
            // Work phase completes.
            let to_break = next_phase(&config);
            breaks.push(to_break.phase);
            config.current_phase = to_break.phase;
            config.current_cycle = to_break.cycle;
            // Break completes, back to work.
            let to_work = next_phase(&config);
            config.current_phase = to_work.phase;
            config.current_cycle = to_work.cycle;
        }
        assert_eq!(
            breaks,
            [
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak
            ]
        );
        assert_eq!(config.current_cycle, 5);
    }

    #[test]
    fn zero_interval_is_treated_as_one() {
        let mut config = config_at(Phase::Work, 1);
        config.long_break_interval = 0;
        let next = next_phase(&config);
        assert_eq!(next.phase, Phase::LongBreak);
    }
}
