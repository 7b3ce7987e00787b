// MIDI File Sequence Core
// Status translation for Core Audio / Core MIDI calls plus a small playback
// controller that pipes every platform status through it.

// Module declarations
pub mod config;
pub mod engine;
pub mod error;
pub mod status;

// Re-exports for convenience
pub use engine::{MusicPlatform, SoundEngine, StubPlatform};
pub use error::{ErrorCode, StatusError};
pub use status::{check_status, report_if_error, OSStatus};
