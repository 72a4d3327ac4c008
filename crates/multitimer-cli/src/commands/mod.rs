pub mod completions;
pub mod config;
pub mod timer;
pub mod watch;
