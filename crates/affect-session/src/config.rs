use crate::error::SessionError;
use affect_core::projector::MAX_TREND_POINTS;
use affect_core::{BreadcrumbShape, CartesianProjector, RingGeometry, ScatterProjector};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunburstConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for SunburstConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub width: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self { width: 250.0 }
    }
}

/// `max_points` may shorten the trend line but never exceed the 15-tick axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub max_points: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            max_points: MAX_TREND_POINTS,
        }
    }
}

/// Chart dimensions. Window size, palette and shading deltas are fixed and
/// cannot be configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub sunburst: SunburstConfig,
    pub breadcrumb: BreadcrumbShape,
    pub scatter: ScatterConfig,
    pub trend: TrendConfig,
}

impl VizConfig {
    pub fn validate(&self) -> Result<(), SessionError> {
        let positive = [
            ("sunburst.width", self.sunburst.width),
            ("sunburst.height", self.sunburst.height),
            ("breadcrumb.width", self.breadcrumb.width),
            ("breadcrumb.height", self.breadcrumb.height),
            ("scatter.width", self.scatter.width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SessionError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !(1..=MAX_TREND_POINTS).contains(&self.trend.max_points) {
            return Err(SessionError::InvalidConfig(format!(
                "trend.max_points must be between 1 and {MAX_TREND_POINTS}, got {}",
                self.trend.max_points
            )));
        }
        Ok(())
    }

    pub fn ring_geometry(&self) -> RingGeometry {
        RingGeometry::for_canvas(self.sunburst.width, self.sunburst.height)
    }

    pub fn cartesian(&self) -> CartesianProjector {
        CartesianProjector::new(self.trend.max_points)
    }

    pub fn scatter(&self) -> ScatterProjector {
        ScatterProjector::for_width(self.scatter.width)
    }
}

/// Load a config file. `.yaml` / `.yml` are read as YAML, anything else as
/// JSON. Missing fields fall back to defaults.
pub fn load(path: &Path) -> Result<VizConfig, SessionError> {
    let file = File::open(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let config: VizConfig = if is_yaml {
        serde_yaml::from_reader(file)?
    } else {
        serde_json::from_reader(file)?
    };
    config.validate()?;
    Ok(config)
}
