pub mod buffer;
pub mod range;
pub mod sample;
pub mod session;
pub mod store;

pub use buffer::SampleBuffer;
pub use sample::{AngleSample, PidSample, SeriesKind};
pub use session::{Action, ConsoleDirection, ConsoleEntry, SessionState};
pub use store::SlidingWindowStore;
