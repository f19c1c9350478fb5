pub mod controller;
pub mod events;
pub mod state;

#[cfg(feature = "desktop")]
pub mod commands;

pub use controller::TeaserController;
pub use events::{RetrievalEvent, StatusSink};
pub use state::{RetrievalStart, RetrievalState, RetrievalStatus, TEASERS};
