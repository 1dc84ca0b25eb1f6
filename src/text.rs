pub mod measure;
pub mod shaped;
