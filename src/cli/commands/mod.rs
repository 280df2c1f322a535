pub mod add;
pub mod backup;
pub mod breathe;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod stats;
pub mod wipe;
