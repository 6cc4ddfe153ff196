mod settings;

pub use settings::{CoverEntry, Logger, Settings};
