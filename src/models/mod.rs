// Data models for athletes, sensor readings, and scoring results

pub mod athlete;
pub mod fatigue_assessment;
pub mod training_session;
pub mod vital_reading;

pub use athlete::*;
pub use fatigue_assessment::*;
pub use training_session::*;
pub use vital_reading::*;
