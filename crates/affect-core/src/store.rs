use crate::channel::{Channel, DescriptionChannel, DESCRIPTION};
use crate::error::AffectError;
use crate::snapshot::AffectSnapshot;
use crate::window::SlidingWindow;
use serde_json::{Map, Value};
use tracing::debug;

/// One bounded history per scalar channel plus one per description channel.
///
/// All windows advance together: an ingest either lands in every window or
/// in none of them.
#[derive(Debug, Clone, Default)]
pub struct SlidingWindowStore {
    scalars: [SlidingWindow<f64>; Channel::COUNT],
    descriptions: [SlidingWindow<String>; 2],
    ingested: u64,
}

impl SlidingWindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one snapshot into every window.
    ///
    /// The snapshot is validated before any window is touched, so a
    /// `Schema` error leaves the store exactly as it was.
    pub fn ingest(&mut self, snapshot: &AffectSnapshot) -> Result<(), AffectError> {
        snapshot.validate()?;

        for channel in Channel::ALL {
            self.scalars[channel.index()].push(snapshot.value(channel));
        }
        for channel in DescriptionChannel::ALL {
            self.descriptions[channel.index()].push(snapshot.description(channel).to_string());
        }
        self.ingested += 1;

        debug!(
            turn = self.ingested,
            window_len = self.len(),
            "affect snapshot ingested"
        );
        Ok(())
    }

    /// Current window contents for `channel`, oldest first.
    pub fn current_history(&self, channel: Channel) -> Vec<f64> {
        self.scalars[channel.index()].to_vec()
    }

    pub fn current_descriptions(&self, channel: DescriptionChannel) -> Vec<String> {
        self.descriptions[channel.index()].to_vec()
    }

    /// Most recent value for `channel`.
    pub fn latest(&self, channel: Channel) -> Result<f64, AffectError> {
        self.scalars[channel.index()]
            .latest()
            .copied()
            .ok_or_else(|| AffectError::EmptyHistory {
                channel: channel.display_path(),
            })
    }

    pub fn latest_description(&self, channel: DescriptionChannel) -> Option<&str> {
        self.descriptions[channel.index()].latest().map(String::as_str)
    }

    /// Number of turns currently held (identical for every window).
    pub fn len(&self) -> usize {
        self.scalars[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total successful ingests since creation, including evicted turns.
    pub fn ingested(&self) -> u64 {
        self.ingested
    }

    /// The store as the nested `{"Affect": {...}}` document consumed by
    /// chart renderers.
    pub fn to_affect_document(&self) -> Value {
        let mut affect = Map::new();
        for channel in DescriptionChannel::ALL {
            let labels = Value::from(self.current_descriptions(channel));
            insert_at(&mut affect, &[channel.group(), DESCRIPTION], labels);
        }
        for channel in Channel::ALL {
            let history = Value::from(self.current_history(channel));
            insert_at(&mut affect, channel.path(), history);
        }

        let mut root = Map::new();
        root.insert("Affect".to_string(), Value::Object(affect));
        Value::Object(root)
    }
}

fn insert_at(map: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [leaf] => {
            map.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = map
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = entry {
                insert_at(child, rest, value);
            }
        }
    }
}
