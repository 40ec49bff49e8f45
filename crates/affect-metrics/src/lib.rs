mod metrics;

#[cfg(test)]
mod tests;

pub use metrics::{AffectMetrics, MetricsError};
