pub mod source;
pub mod tracing;

pub use source::FakeServer;
pub use self::tracing::{CapturedEvent, captured_events};
