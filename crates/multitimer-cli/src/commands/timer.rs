use clap::Subcommand;
use multitimer_core::format::{format_hms, format_hms_cs};
use multitimer_core::{
    compute_runtime, Clock, Command, Config, Direction, Engine, EngineEvent, TimerKind,
    TimerState, TimerStatus,
};
use uuid::Uuid;

use crate::store;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Add a timer, or replace one with the same id
    Add {
        /// Display label
        label: String,
        /// Countdown length in seconds
        #[arg(long, default_value = "300", conflicts_with = "stopwatch")]
        duration: u64,
        /// Create a stopwatch instead of a countdown
        #[arg(long)]
        stopwatch: bool,
        /// Count up toward the target instead of down
        #[arg(long)]
        up: bool,
        /// Restart automatically when the countdown reaches zero
        #[arg(long = "loop")]
        looping: bool,
        /// Attach a pomodoro sequence using the configured defaults
        #[arg(long)]
        pomodoro: bool,
        /// Timer id (defaults to a fresh UUID)
        #[arg(long)]
        id: Option<String>,
    },
    /// List timers with live runtime values
    List,
    /// Print one timer's runtime as JSON
    Status {
        /// Timer id
        id: String,
    },
    /// Start or resume a timer
    Start {
        /// Timer id
        id: String,
    },
    /// Pause a running timer
    Pause {
        /// Timer id
        id: String,
    },
    /// Reset a timer to its pristine state
    Reset {
        /// Timer id
        id: String,
    },
    /// Record a lap on a running stopwatch
    Lap {
        /// Timer id
        id: String,
    },
    /// Remove a timer
    Remove {
        /// Timer id
        id: String,
    },
    /// Start every timer
    StartAll,
    /// Pause every timer
    PauseAll,
    /// Reset every timer
    ResetAll,
    /// Remove every timer
    Clear,
}

fn build_timer(
    label: String,
    duration: u64,
    stopwatch: bool,
    up: bool,
    looping: bool,
    pomodoro: bool,
    id: Option<String>,
) -> TimerState {
    let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let mut timer = if stopwatch {
        TimerState::stopwatch(id)
    } else {
        TimerState::countdown(id, duration.saturating_mul(1_000))
    };
    timer.label = label;
    if up {
        timer.direction = Direction::Up;
    }
    timer.looping = looping;
    if pomodoro {
        timer.pomodoro = Some(Config::load_or_default().pomodoro_config());
    }
    timer
}

fn kind_name(kind: TimerKind) -> &'static str {
    match kind {
        TimerKind::CountdownTimer => "countdown",
        TimerKind::Stopwatch => "stopwatch",
    }
}

fn status_name(status: TimerStatus) -> &'static str {
    match status {
        TimerStatus::Idle => "idle",
        TimerStatus::Running => "running",
        TimerStatus::Paused => "paused",
        TimerStatus::Completed => "completed",
    }
}

fn print_table(engine: &Engine, now_ms: u64) {
    if engine.timers().is_empty() {
        println!("no timers");
        return;
    }
    println!(
        "{:<36}  {:<9}  {:<9}  {:>12}  {:>5}  label",
        "id", "kind", "status", "display", "loops"
    );
    for timer in engine.timers() {
        let snapshot = compute_runtime(timer, now_ms);
        let display = match timer.kind {
            TimerKind::Stopwatch => format_hms_cs(snapshot.display_ms),
            TimerKind::CountdownTimer => format_hms(snapshot.display_ms),
        };
        println!(
            "{:<36}  {:<9}  {:<9}  {:>12}  {:>5}  {}",
            timer.id,
            kind_name(timer.kind),
            status_name(snapshot.status),
            display,
            snapshot.loops_completed,
            timer.label
        );
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::with_timers(store::load_timers()?);
    let now_ms = Clock::new().now_ms();

    let events = match action {
        TimerAction::Add {
            label,
            duration,
            stopwatch,
            up,
            looping,
            pomodoro,
            id,
        } => {
            let timer = build_timer(label, duration, stopwatch, up, looping, pomodoro, id);
            engine.apply(Command::Upsert { timer }, now_ms)
        }
        TimerAction::List => {
            print_table(&engine, now_ms);
            return Ok(());
        }
        TimerAction::Status { id } => match engine.get(&id) {
            Some(timer) => {
                let snapshot = compute_runtime(timer, now_ms);
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
                return Ok(());
            }
            None => {
                eprintln!("unknown timer: {id}");
                std::process::exit(1);
            }
        },
        TimerAction::Start { id } => engine.apply(Command::Start { id }, now_ms),
        TimerAction::Pause { id } => engine.apply(Command::Pause { id }, now_ms),
        TimerAction::Reset { id } => engine.apply(Command::Reset { id }, now_ms),
        TimerAction::Lap { id } => engine.apply(Command::Lap { id }, now_ms),
        TimerAction::Remove { id } => engine.apply(Command::Remove { id }, now_ms),
        TimerAction::StartAll => engine.apply(Command::StartAll, now_ms),
        TimerAction::PauseAll => engine.apply(Command::PauseAll, now_ms),
        TimerAction::ResetAll => engine.apply(Command::ResetAll, now_ms),
        TimerAction::Clear => engine.apply(Command::KillAll, now_ms),
    };

    for event in &events {
        if matches!(
            event,
            EngineEvent::Snapshot { .. } | EngineEvent::Lap { .. }
        ) {
            println!("{}", serde_json::to_string_pretty(event)?);
        }
    }

    store::save_timers(engine.timers())?;
    Ok(())
}
