pub mod config;
pub mod error;
pub mod session;

#[cfg(test)]
mod tests;

pub use config::{load as load_config, ScatterConfig, SunburstConfig, TrendConfig, VizConfig};
pub use error::SessionError;
pub use session::{AffectSession, FocusView, Frame, SharedSession};
