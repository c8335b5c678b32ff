pub mod clock;
pub mod config;
pub mod export;
pub mod format;
pub mod rank;
pub mod report;
pub mod system;
