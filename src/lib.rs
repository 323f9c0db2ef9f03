pub mod cli;
pub mod display_summary;
pub mod error;
pub mod level;
pub mod stack;
pub mod types;

// Re-export commonly used items
pub use error::{LevelError, ProcessError};
pub use level::{DegeneratePolicy, LevelReport, SampleBuffer, SliceLeveler};
pub use types::{Dimensions, Encoding};
