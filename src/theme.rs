pub mod backdrop;
pub mod notifier;
pub mod palette;
