pub mod recording;
pub mod surface;
