mod engine;

pub use engine::{FocusSession, FocusStatus, SessionOutcome, SessionRecord};
