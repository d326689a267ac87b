pub mod snapshot;
pub mod delta_log;
pub mod tracker;

pub use snapshot::DeltaSnapshot;
pub use delta_log::DeltaLog;
pub use tracker::DeltaTracker;
