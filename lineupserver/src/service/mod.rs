pub mod directory_service;
pub mod registry_service;

pub use directory_service::{CoachDirectory, CoachEntry, PendingLineup};
pub use registry_service::PlayerRegistry;
