use crate::channel::{
    Channel, DescriptionChannel, BIG_FIVE, DESCRIPTION, EMOTION, MOOD, PAD, PERSONALITY,
    SATISFACTION,
};
use crate::store::SlidingWindowStore;

/// Shape of one entry in the affect hierarchy, fixed by the snapshot schema.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeSpec {
    /// A metric and its numeric history, oldest first.
    Leaf(Vec<f64>),
    /// A container with ordered, keyed children.
    Group(Vec<(String, NodeSpec)>),
    /// Textual labels hoisted onto the enclosing group; never drawn.
    DescriptionField(Vec<String>),
}

impl NodeSpec {
    pub fn group<K: Into<String>>(children: impl IntoIterator<Item = (K, NodeSpec)>) -> Self {
        NodeSpec::Group(children.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Current store contents in canonical order:
/// Emotion, Mood, Personality (PAD, Big Five), Satisfaction.
pub fn affect_layout(store: &SlidingWindowStore) -> Vec<(String, NodeSpec)> {
    let leaf = |channel: Channel| {
        let history = NodeSpec::Leaf(store.current_history(channel));
        (channel.key().to_string(), history)
    };
    let described = |channel: DescriptionChannel, pad: [Channel; 3]| {
        let mut children = vec![(
            DESCRIPTION.to_string(),
            NodeSpec::DescriptionField(store.current_descriptions(channel)),
        )];
        children.extend(pad.into_iter().map(leaf));
        NodeSpec::Group(children)
    };

    vec![
        (
            EMOTION.to_string(),
            described(
                DescriptionChannel::Emotion,
                [Channel::EmotionPleasure, Channel::EmotionArousal, Channel::EmotionDominance],
            ),
        ),
        (
            MOOD.to_string(),
            described(
                DescriptionChannel::Mood,
                [Channel::MoodPleasure, Channel::MoodArousal, Channel::MoodDominance],
            ),
        ),
        (
            PERSONALITY.to_string(),
            NodeSpec::group([
                (
                    PAD,
                    NodeSpec::Group(
                        [
                            Channel::PersonalityPleasure,
                            Channel::PersonalityArousal,
                            Channel::PersonalityDominance,
                        ]
                        .into_iter()
                        .map(leaf)
                        .collect(),
                    ),
                ),
                (
                    BIG_FIVE,
                    NodeSpec::Group(
                        [
                            Channel::Openness,
                            Channel::Conscientiousness,
                            Channel::Extroversion,
                            Channel::Agreeableness,
                            Channel::Neuroticism,
                        ]
                        .into_iter()
                        .map(leaf)
                        .collect(),
                    ),
                ),
            ]),
        ),
        (
            SATISFACTION.to_string(),
            NodeSpec::Leaf(store.current_history(Channel::Satisfaction)),
        ),
    ]
}
