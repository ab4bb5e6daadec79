pub mod commands;
pub mod controller;
pub mod error;

pub use controller::{TimerController, TimerSnapshot};
pub use error::TimerError;
