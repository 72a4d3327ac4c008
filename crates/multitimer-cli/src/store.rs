//! Timer persistence: a JSON file in the data directory holding the full
//! timer list. Read before every command, rewritten after every mutation.

use std::fs;
use std::path::PathBuf;

use multitimer_core::{data_dir, TimerState};

const STORE_FILE: &str = "timers.json";

fn store_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join(STORE_FILE))
}

/// Load the persisted timer list. A missing file is an empty list.
pub fn load_timers() -> Result<Vec<TimerState>, Box<dyn std::error::Error>> {
    let path = store_path()?;
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Overwrite the persisted timer list.
pub fn save_timers(timers: &[TimerState]) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(timers)?;
    fs::write(store_path()?, json)?;
    Ok(())
}
