pub mod autopilot;
pub mod human;

pub use autopilot::{AutopilotConfig, AutopilotMode};
pub use human::HumanMode;
