//! Embassy async tasks

pub mod clock;

pub use clock::{clock_task, BoardDisplay, BoardRtc};
