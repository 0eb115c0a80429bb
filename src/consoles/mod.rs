//! Console implementations

pub mod recording;
pub mod stdio;

pub use recording::{ConsoleCall, RecordingConsole};
pub use stdio::StdConsole;

// Re-export the trait for convenience
pub use crate::core::Console;
