//! CLI library components for the quiz show host.

pub mod logging;
pub mod play;
pub mod settings;
pub mod summary;
