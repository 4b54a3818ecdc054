pub mod archive;
pub mod error;
pub mod listing;
pub mod paths;
pub mod progress;
pub mod spec;

pub use error::{OpenSpecError, Result};
