//! # Multitimer Core Library
//!
//! Timing engine for a multi-timer/stopwatch/pomodoro application. The
//! engine maintains authoritative elapsed/remaining time for any number of
//! independently running timers, detects completion and loop boundaries,
//! and drives a pomodoro work/break phase state machine -- all from
//! absolute timestamps, never from tick-accumulated counters.
//!
//! ## Architecture
//!
//! - **Runtime calculator**: pure derivation of per-timer runtime values
//!   from persisted state plus a point in time
//! - **Engine**: the timer registry plus command handling and exactly-once
//!   edge detection, synchronous and deterministic (time is a parameter)
//! - **Worker**: a tokio task owning the engine, fed by a FIFO command
//!   channel and a fixed-cadence tick, emitting events to the host
//! - **Config**: TOML-based cadence and pomodoro defaults
//!
//! ## Key Components
//!
//! - [`Engine`]: registry and state machine
//! - [`compute_runtime`]: the pure runtime calculator
//! - [`worker::spawn`]: the scheduler worker
//! - [`Command`] / [`EngineEvent`]: the host boundary
//! - [`Config`]: application configuration management

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod timer;
pub mod worker;

pub use clock::Clock;
pub use config::{data_dir, Config};
pub use error::{ConfigError, CoreError, Result};
pub use events::{Command, EngineEvent};
pub use timer::{
    compute_runtime, next_phase, Direction, Engine, Phase, PhaseTransition, PomodoroConfig,
    RuntimeSnapshot, TimerKind, TimerState, TimerStatus,
};
pub use worker::EngineHandle;
