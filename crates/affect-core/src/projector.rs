use crate::channel::Channel;
use crate::color::Rgb;
use crate::store::SlidingWindowStore;
use serde::{Deserialize, Serialize};

/// Affect scores are bounded by definition; the value axis never rescales.
pub const VALUE_DOMAIN: (f64, f64) = (-1.0, 1.0);

/// Matches the trend chart's x-axis tick count.
pub const MAX_TREND_POINTS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 0-based position in the window, oldest first.
    pub turn: usize,
    pub value: f64,
}

/// A projected trend line plus its axis domains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLine {
    pub points: Vec<TrendPoint>,
    /// Observed extent of `turn`; `None` when there are no points.
    pub turn_domain: Option<(usize, usize)>,
    pub value_domain: (f64, f64),
    /// Stroke color, taken from the focused node. `None` for the initial line.
    pub color: Option<Rgb>,
}

/// Turns one metric's history into (turn, value) pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianProjector {
    max_points: usize,
}

impl Default for CartesianProjector {
    fn default() -> Self {
        Self::new(MAX_TREND_POINTS)
    }
}

impl CartesianProjector {
    pub fn new(max_points: usize) -> Self {
        Self { max_points }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn project(&self, history: &[f64]) -> Vec<TrendPoint> {
        history
            .iter()
            .take(self.max_points)
            .enumerate()
            .map(|(turn, &value)| TrendPoint { turn, value })
            .collect()
    }

    pub fn line(&self, history: &[f64]) -> TrendLine {
        let points = self.project(history);
        TrendLine {
            turn_domain: turn_domain(&points),
            points,
            value_domain: VALUE_DOMAIN,
            color: None,
        }
    }

    /// Flat zero line shown before the first snapshot arrives.
    pub fn initial_line(&self) -> TrendLine {
        self.line(&vec![0.0; self.max_points])
    }
}

pub fn turn_domain(points: &[TrendPoint]) -> Option<(usize, usize)> {
    let min = points.iter().map(|p| p.turn).min()?;
    let max = points.iter().map(|p| p.turn).max()?;
    Some((min, max))
}

/// One PAD position in the 3D scatter view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub label: &'static str,
    pub pleasure: f64,
    pub arousal: f64,
    pub dominance: f64,
    pub color: Rgb,
    /// Scene coordinates (x = pleasure, y = arousal, z = dominance).
    pub position: [f64; 3],
}

const SCATTER_SOURCES: [(&str, [Channel; 3], Rgb); 3] = [
    (
        "Emotion",
        [Channel::EmotionPleasure, Channel::EmotionArousal, Channel::EmotionDominance],
        Rgb::new(0x93, 0x64, 0x8D),
    ),
    (
        "Mood",
        [Channel::MoodPleasure, Channel::MoodArousal, Channel::MoodDominance],
        Rgb::new(0xFF, 0xC6, 0x5D),
    ),
    (
        "Personality",
        [
            Channel::PersonalityPleasure,
            Channel::PersonalityArousal,
            Channel::PersonalityDominance,
        ],
        Rgb::new(0x7B, 0xC8, 0xA4),
    ),
];

/// Latest PAD triples for Emotion, Mood and Personality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterProjector {
    /// Scene half-extent that +-1 maps onto.
    half_extent: f64,
}

impl Default for ScatterProjector {
    fn default() -> Self {
        Self::for_width(250.0)
    }
}

impl ScatterProjector {
    /// Axes span `[-width / 5, width / 5]`.
    pub fn for_width(width: f64) -> Self {
        Self {
            half_extent: width / 5.0,
        }
    }

    pub fn scale(&self, v: f64) -> f64 {
        let (lo, hi) = VALUE_DOMAIN;
        -self.half_extent + (v - lo) / (hi - lo) * 2.0 * self.half_extent
    }

    /// Only the newest entry of each window is used. Sources without
    /// history are skipped.
    pub fn project(&self, store: &SlidingWindowStore) -> Vec<ScatterPoint> {
        SCATTER_SOURCES
            .iter()
            .filter_map(|(label, [p, a, d], color)| {
                let pleasure = store.latest(*p).ok()?;
                let arousal = store.latest(*a).ok()?;
                let dominance = store.latest(*d).ok()?;
                Some(ScatterPoint {
                    label: *label,
                    pleasure,
                    arousal,
                    dominance,
                    color: *color,
                    position: [self.scale(pleasure), self.scale(arousal), self.scale(dominance)],
                })
            })
            .collect()
    }
}
