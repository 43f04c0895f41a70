pub mod api;
pub mod config;
pub mod state;
pub mod ui;

pub use api::{ClockTime, DetectTimeResponse, DetectionFailure, DetectionResult};
pub use config::ApiConfig;
pub use state::{Command, DetectorState, Event, Generation, ImageSource, RequestState};
pub use ui::{AlertVariant, ButtonSize, ButtonVariant};
