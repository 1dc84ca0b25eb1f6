pub mod clock;
pub mod config;
pub mod runner;
pub mod stream;
pub mod timers;
pub mod typing;
pub mod word;
