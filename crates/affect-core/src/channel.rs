use crate::error::AffectError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const EMOTION: &str = "Emotion";
pub const MOOD: &str = "Mood";
pub const PERSONALITY: &str = "Personality";
pub const SATISFACTION: &str = "Satisfaction";
pub const PAD: &str = "PAD";
pub const BIG_FIVE: &str = "Big Five";
pub const DESCRIPTION: &str = "Description";

/// Top-level groups, in drawing order.
pub const TOP_LEVEL: [&str; 4] = [EMOTION, MOOD, PERSONALITY, SATISFACTION];

/// A scalar affect metric with its own history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    EmotionPleasure,
    EmotionArousal,
    EmotionDominance,
    MoodPleasure,
    MoodArousal,
    MoodDominance,
    PersonalityPleasure,
    PersonalityArousal,
    PersonalityDominance,
    Openness,
    Conscientiousness,
    Extroversion,
    Agreeableness,
    Neuroticism,
    Satisfaction,
}

impl Channel {
    pub const COUNT: usize = 15;

    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::EmotionPleasure,
        Channel::EmotionArousal,
        Channel::EmotionDominance,
        Channel::MoodPleasure,
        Channel::MoodArousal,
        Channel::MoodDominance,
        Channel::PersonalityPleasure,
        Channel::PersonalityArousal,
        Channel::PersonalityDominance,
        Channel::Openness,
        Channel::Conscientiousness,
        Channel::Extroversion,
        Channel::Agreeableness,
        Channel::Neuroticism,
        Channel::Satisfaction,
    ];

    /// Position in [`Channel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key segments from the top-level group down to the metric.
    pub fn path(self) -> &'static [&'static str] {
        match self {
            Channel::EmotionPleasure => &[EMOTION, "Pleasure"],
            Channel::EmotionArousal => &[EMOTION, "Arousal"],
            Channel::EmotionDominance => &[EMOTION, "Dominance"],
            Channel::MoodPleasure => &[MOOD, "Pleasure"],
            Channel::MoodArousal => &[MOOD, "Arousal"],
            Channel::MoodDominance => &[MOOD, "Dominance"],
            Channel::PersonalityPleasure => &[PERSONALITY, PAD, "Pleasure"],
            Channel::PersonalityArousal => &[PERSONALITY, PAD, "Arousal"],
            Channel::PersonalityDominance => &[PERSONALITY, PAD, "Dominance"],
            Channel::Openness => &[PERSONALITY, BIG_FIVE, "Openness"],
            Channel::Conscientiousness => &[PERSONALITY, BIG_FIVE, "Conscientiousness"],
            Channel::Extroversion => &[PERSONALITY, BIG_FIVE, "Extroversion"],
            Channel::Agreeableness => &[PERSONALITY, BIG_FIVE, "Agreeableness"],
            Channel::Neuroticism => &[PERSONALITY, BIG_FIVE, "Neuroticism"],
            Channel::Satisfaction => &[SATISFACTION],
        }
    }

    /// Leaf key, e.g. `"Openness"`.
    pub fn key(self) -> &'static str {
        let path = self.path();
        path[path.len() - 1]
    }

    /// Slash-joined path, e.g. `"Personality/Big Five/Openness"`.
    pub fn display_path(self) -> String {
        self.path().join("/")
    }

    pub fn from_path(path: &str) -> Result<Channel, AffectError> {
        let wanted: Vec<&str> = path.split('/').map(str::trim).collect();
        Channel::ALL
            .into_iter()
            .find(|c| c.path().iter().copied().eq(wanted.iter().copied()))
            .ok_or_else(|| AffectError::UnknownChannel(path.to_string()))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_path())
    }
}

/// Textual label channels (emotion and mood names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DescriptionChannel {
    Emotion,
    Mood,
}

impl DescriptionChannel {
    pub const ALL: [DescriptionChannel; 2] =
        [DescriptionChannel::Emotion, DescriptionChannel::Mood];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn group(self) -> &'static str {
        match self {
            DescriptionChannel::Emotion => EMOTION,
            DescriptionChannel::Mood => MOOD,
        }
    }
}

impl fmt::Display for DescriptionChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group(), DESCRIPTION)
    }
}
