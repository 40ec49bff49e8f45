use crate::channel::{Channel, DescriptionChannel};
use crate::error::AffectError;
use serde::{Deserialize, Serialize};

/// Pleasure / arousal / dominance triple, each nominally in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pad {
    pub pleasure: f64,
    pub arousal: f64,
    pub dominance: f64,
}

impl Pad {
    pub fn new(pleasure: f64, arousal: f64, dominance: f64) -> Self {
        Self {
            pleasure,
            arousal,
            dominance,
        }
    }
}

/// Emotion or mood reading: a PAD triple plus its textual label.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AffectReading {
    pub pad: Pad,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BigFive {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extroversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Personality {
    pub pad: Pad,
    pub big_five: BigFive,
}

/// One turn's worth of normalized affect, ready for ingest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AffectSnapshot {
    pub emotion: AffectReading,
    pub mood: AffectReading,
    pub personality: Personality,
    /// Not clamped; may exceed [-1, 1].
    pub satisfaction: f64,
}

impl AffectSnapshot {
    /// Scalar carried by this snapshot for `channel`.
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::EmotionPleasure => self.emotion.pad.pleasure,
            Channel::EmotionArousal => self.emotion.pad.arousal,
            Channel::EmotionDominance => self.emotion.pad.dominance,
            Channel::MoodPleasure => self.mood.pad.pleasure,
            Channel::MoodArousal => self.mood.pad.arousal,
            Channel::MoodDominance => self.mood.pad.dominance,
            Channel::PersonalityPleasure => self.personality.pad.pleasure,
            Channel::PersonalityArousal => self.personality.pad.arousal,
            Channel::PersonalityDominance => self.personality.pad.dominance,
            Channel::Openness => self.personality.big_five.openness,
            Channel::Conscientiousness => self.personality.big_five.conscientiousness,
            Channel::Extroversion => self.personality.big_five.extroversion,
            Channel::Agreeableness => self.personality.big_five.agreeableness,
            Channel::Neuroticism => self.personality.big_five.neuroticism,
            Channel::Satisfaction => self.satisfaction,
        }
    }

    pub fn description(&self, channel: DescriptionChannel) -> &str {
        match channel {
            DescriptionChannel::Emotion => &self.emotion.description,
            DescriptionChannel::Mood => &self.mood.description,
        }
    }

    /// Every scalar must be finite. Ranges are not enforced.
    pub fn validate(&self) -> Result<(), AffectError> {
        for channel in Channel::ALL {
            let v = self.value(channel);
            if !v.is_finite() {
                return Err(AffectError::schema(format!(
                    "{} is not a finite number ({v})",
                    channel.display_path()
                )));
            }
        }
        Ok(())
    }
}
