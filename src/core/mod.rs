pub mod add;
pub mod backup;
pub mod breathe;
pub mod config;
pub mod history;
pub mod log;
pub mod stats;
pub mod wipe;
pub mod wizard;
