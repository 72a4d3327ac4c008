use clap::Args;
use multitimer_core::{worker, Clock, Command, Config, Engine, EngineEvent};

use crate::store;

#[derive(Args)]
pub struct WatchArgs {
    /// Also print per-tick runtime frames (noisy)
    #[arg(long)]
    pub ticks: bool,
}

/// Run the engine worker over the persisted timers and stream its events
/// to stdout as JSON lines until interrupted.
pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let timers = store::load_timers()?;
    let config = Config::load_or_default();
    tracing::info!(
        timers = timers.len(),
        tick_interval_ms = config.engine.tick_interval_ms,
        "starting engine worker"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome: Result<(), Box<dyn std::error::Error>> = runtime.block_on(async move {
        let (handle, mut events) =
            worker::spawn(Engine::new(), Clock::new(), config.tick_interval());
        handle.send(Command::Init { timers })?;

        while let Some(event) = events.recv().await {
            if matches!(event, EngineEvent::Tick { .. }) && !args.ticks {
                continue;
            }
            println!("{}", serde_json::to_string(&event)?);
        }
        tracing::info!("engine worker stopped");
        Ok(())
    });
    outcome
}
