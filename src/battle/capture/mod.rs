pub mod attempt;
pub mod calculation;

pub use attempt::{attempt_capture, finalize_captures};
pub use calculation::{ailment_bonus, capture_band, capture_threshold};
