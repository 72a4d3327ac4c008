//! Scheduler worker: the task that owns the engine.
//!
//! One tokio task has exclusive ownership of an [`Engine`]; the host talks
//! to it over channels only. Commands are processed FIFO and each one runs
//! to completion (snapshot included) before the next command or tick, so
//! there is no reentrancy inside the engine.
//!
//! The tick interval self-schedules against absolute deadlines: when the
//! loop falls behind, the missed ticks fire back-to-back instead of
//! shifting the cadence (tokio's default burst behavior).
//!
//! ## Shutdown
//!
//! Dropping the last [`EngineHandle`] closes the command channel and ends
//! the worker; the worker likewise ends when the host drops the event
//! receiver.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::clock::Clock;
use crate::error::{CoreError, Result};
use crate::events::{stamp, Command, EngineEvent};
use crate::timer::Engine;

/// Host-side sender for engine commands.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl EngineHandle {
    /// Queue a command for the worker.
    pub fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| CoreError::ChannelClosed)
    }
}

/// Spawn the engine worker onto the current tokio runtime.
///
/// Returns the command handle and the event stream. The worker emits
/// `ready` once before its first tick.
pub fn spawn(
    engine: Engine,
    clock: Clock,
    tick_interval: Duration,
) -> (EngineHandle, mpsc::UnboundedReceiver<EngineEvent>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    tokio::spawn(run(engine, clock, tick_interval, command_rx, event_tx));
    (
        EngineHandle {
            commands: command_tx,
        },
        event_rx,
    )
}

async fn run(
    mut engine: Engine,
    clock: Clock,
    tick_interval: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<EngineEvent>,
) {
    if events
        .send(EngineEvent::Ready {
            at: stamp(clock.now_ms()),
        })
        .is_err()
    {
        return;
    }
    // interval() panics on a zero period.
    let mut ticker = tokio::time::interval(tick_interval.max(Duration::from_millis(1)));
    loop {
        tokio::select! {
            biased;

            command = commands.recv() => {
                let Some(command) = command else {
                    // Handle dropped: engine shuts down.
                    return;
                };
                for event in engine.apply(command, clock.now_ms()) {
                    if events.send(event).is_err() {
                        return;
                    }
                }
            }

            _ = ticker.tick() => {
                for event in engine.tick(clock.now_ms()) {
                    if events.send(event).is_err() {
                        return;
                    }
                }
            }
        }
    }
}
