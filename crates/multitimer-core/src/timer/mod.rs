//! Timer domain: the data model, the pure runtime calculator, the pomodoro
//! phase resolver, and the engine that ties them to commands and ticks.

mod engine;
mod pomodoro;
mod runtime;
mod state;

pub use engine::Engine;
pub use pomodoro::{next_phase, PhaseTransition};
pub use runtime::compute_runtime;
pub use state::{
    Direction, Phase, PomodoroConfig, RuntimeSnapshot, TimerKind, TimerState, TimerStatus,
};
