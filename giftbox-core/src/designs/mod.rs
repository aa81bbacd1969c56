//! Saved designs: named snapshots of a builder configuration.

mod clock;
mod repository;

pub use clock::{Clock, SystemClock};
pub use repository::DesignRepository;
