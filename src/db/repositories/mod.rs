pub mod segments;
pub mod timers;
