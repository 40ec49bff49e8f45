//! Maps the remote affect-analysis user record onto [`AffectSnapshot`].
//!
//! This is the only place that knows the external field names
//! (`emotion.emotionName`, `personality.bigFive.openness`,
//! `satisfaction.score`, ...).

use crate::error::AffectError;
use crate::snapshot::{AffectReading, AffectSnapshot, BigFive, Pad, Personality};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalPad {
    pub pleasure: f64,
    pub arousal: f64,
    pub dominance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEmotion {
    pub emotion_name: String,
    pub pad: ExternalPad,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMood {
    pub mood_name: String,
    pub pad: ExternalPad,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalBigFive {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extroversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPersonality {
    pub pad: ExternalPad,
    pub big_five: ExternalBigFive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalSatisfaction {
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalAffect {
    pub emotion: ExternalEmotion,
    pub mood: ExternalMood,
    pub personality: ExternalPersonality,
    pub satisfaction: ExternalSatisfaction,
}

/// A user as returned by the affect-analysis API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub user_id: Option<String>,
    pub affect: ExternalAffect,
}

impl From<&ExternalPad> for Pad {
    fn from(pad: &ExternalPad) -> Self {
        Pad::new(pad.pleasure, pad.arousal, pad.dominance)
    }
}

impl From<&UserRecord> for AffectSnapshot {
    fn from(user: &UserRecord) -> Self {
        let affect = &user.affect;
        let big_five = &affect.personality.big_five;
        AffectSnapshot {
            emotion: AffectReading {
                pad: Pad::from(&affect.emotion.pad),
                description: affect.emotion.emotion_name.clone(),
            },
            mood: AffectReading {
                pad: Pad::from(&affect.mood.pad),
                description: affect.mood.mood_name.clone(),
            },
            personality: Personality {
                pad: Pad::from(&affect.personality.pad),
                big_five: BigFive {
                    openness: big_five.openness,
                    conscientiousness: big_five.conscientiousness,
                    extroversion: big_five.extroversion,
                    agreeableness: big_five.agreeableness,
                    neuroticism: big_five.neuroticism,
                },
            },
            satisfaction: affect.satisfaction.score,
        }
    }
}

/// Convert a JSON payload into a validated snapshot.
///
/// Accepts either the bare user record or the API envelope
/// `{"status": {...}, "user": {...}}`.
pub fn snapshot_from_value(payload: Value) -> Result<AffectSnapshot, AffectError> {
    let user_value = match payload {
        Value::Object(mut map) if map.contains_key("user") => map
            .remove("user")
            .ok_or_else(|| AffectError::schema("missing user record"))?,
        other => other,
    };
    let user: UserRecord = serde_json::from_value(user_value)
        .map_err(|e| AffectError::schema(format!("user record: {e}")))?;
    let snapshot = AffectSnapshot::from(&user);
    snapshot.validate()?;
    Ok(snapshot)
}

pub fn snapshot_from_json(payload: &str) -> Result<AffectSnapshot, AffectError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| AffectError::schema(format!("invalid JSON: {e}")))?;
    snapshot_from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_json() -> Value {
        json!({
            "userId": "u-1",
            "affect": {
                "emotion": {
                    "emotionName": "joy",
                    "pad": { "pleasure": 0.4, "arousal": 0.2, "dominance": 0.1 }
                },
                "mood": {
                    "moodName": "relaxed",
                    "pad": { "pleasure": 0.3, "arousal": -0.2, "dominance": 0.0 }
                },
                "personality": {
                    "pad": { "pleasure": 0.1, "arousal": 0.05, "dominance": 0.2 },
                    "bigFive": {
                        "openness": 0.6, "conscientiousness": 0.5, "extroversion": 0.4,
                        "agreeableness": 0.7, "neuroticism": -0.3
                    }
                },
                "satisfaction": { "score": 1.4 }
            }
        })
    }

    #[test]
    fn maps_external_field_names() {
        let snapshot = snapshot_from_value(user_json()).unwrap();
        assert_eq!(snapshot.emotion.description, "joy");
        assert_eq!(snapshot.mood.description, "relaxed");
        assert_eq!(snapshot.personality.big_five.agreeableness, 0.7);
        assert_eq!(snapshot.personality.pad.dominance, 0.2);
        assert_eq!(snapshot.satisfaction, 1.4);
    }

    #[test]
    fn unwraps_api_envelope() {
        let envelope = json!({ "status": { "code": 200 }, "user": user_json() });
        let snapshot = snapshot_from_json(&envelope.to_string()).unwrap();
        assert_eq!(snapshot.emotion.pad.pleasure, 0.4);
    }

    #[test]
    fn missing_field_is_schema_error() {
        let mut payload = user_json();
        payload["affect"]["personality"]["bigFive"]
            .as_object_mut()
            .unwrap()
            .remove("neuroticism");
        let err = snapshot_from_value(payload).unwrap_err();
        assert!(err.is_schema(), "{err}");
    }

    #[test]
    fn garbage_is_schema_error() {
        assert!(snapshot_from_json("not json").unwrap_err().is_schema());
        assert!(snapshot_from_json("[1, 2, 3]").unwrap_err().is_schema());
    }
}
