use crate::config::VizConfig;
use crate::error::SessionError;
use affect_core::{
    affect_layout, breadcrumb_trail, snapshot_from_json, AffectSnapshot, CartesianProjector,
    Channel, Crumb, HierarchyPartitioner, HierarchyTree, HoverSummary, NodeId, PaletteCursor,
    ScatterPoint, ScatterProjector, SlidingWindowStore, TrendLine,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What a hovered (focused) metric contributes to a frame.
#[derive(Debug, Clone, Serialize)]
pub struct FocusView {
    pub channel: String,
    pub node: NodeId,
    pub breadcrumb: Vec<Crumb>,
    pub hover: HoverSummary,
}

/// Everything renderers need after one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub session_id: Uuid,
    /// Successful ingests so far.
    pub turn: u64,
    pub refreshed_at: DateTime<Utc>,
    pub tree: HierarchyTree,
    /// Trend for the focused channel, drawn in its node color, or the flat
    /// initial line.
    pub trend: TrendLine,
    pub focus: Option<FocusView>,
    pub scatter: Vec<ScatterPoint>,
}

/// Owns the affect windows and the process-wide palette cursor for one
/// conversation.
///
/// `refresh` is all-or-nothing: the snapshot is staged on a copy of the
/// store and the cursor, and only committed once the tree has been built.
#[derive(Debug)]
pub struct AffectSession {
    id: Uuid,
    config: VizConfig,
    store: SlidingWindowStore,
    palette: PaletteCursor,
    partitioner: HierarchyPartitioner,
    cartesian: CartesianProjector,
    scatter: ScatterProjector,
    focus: Option<Channel>,
}

impl AffectSession {
    pub fn new(config: VizConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            partitioner: HierarchyPartitioner::new(config.ring_geometry()),
            cartesian: config.cartesian(),
            scatter: config.scatter(),
            config,
            store: SlidingWindowStore::new(),
            palette: PaletteCursor::new(),
            focus: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn store(&self) -> &SlidingWindowStore {
        &self.store
    }

    pub fn palette(&self) -> &PaletteCursor {
        &self.palette
    }

    pub fn focus(&self) -> Option<Channel> {
        self.focus
    }

    /// Channel whose trend line and breadcrumb appear in each frame.
    pub fn set_focus(&mut self, channel: Option<Channel>) {
        self.focus = channel;
    }

    /// Ingest one snapshot, rebuild the tree and project the views.
    ///
    /// On error the windows and the palette cursor are exactly as before.
    pub fn refresh(&mut self, snapshot: &AffectSnapshot) -> Result<Frame, SessionError> {
        let mut store = self.store.clone();
        let mut palette = self.palette.clone();

        let staged = store
            .ingest(snapshot)
            .and_then(|()| self.partitioner.partition(&affect_layout(&store), &mut palette));
        let tree = match staged {
            Ok(tree) => tree,
            Err(e) => {
                warn!(
                    session = %self.id,
                    turn = self.store.ingested(),
                    error = %e,
                    "affect snapshot rejected, keeping previous state"
                );
                return Err(e.into());
            }
        };

        self.store = store;
        self.palette = palette;
        let frame = self.assemble(tree);
        info!(
            session = %self.id,
            turn = frame.turn,
            nodes = frame.tree.len(),
            "affect frame refreshed"
        );
        Ok(frame)
    }

    /// Same as [`AffectSession::refresh`] for a raw API payload.
    pub fn refresh_json(&mut self, payload: &str) -> Result<Frame, SessionError> {
        match snapshot_from_json(payload) {
            Ok(snapshot) => self.refresh(&snapshot),
            Err(e) => {
                warn!(session = %self.id, error = %e, "affect payload rejected");
                Err(e.into())
            }
        }
    }

    /// Rebuild from the current windows without ingesting. Like every chart
    /// rebuild this consumes palette colors.
    pub fn current_frame(&mut self) -> Result<Frame, SessionError> {
        let tree = self
            .partitioner
            .partition(&affect_layout(&self.store), &mut self.palette)?;
        debug!(session = %self.id, turn = self.store.ingested(), "affect frame rebuilt");
        Ok(self.assemble(tree))
    }

    fn assemble(&self, tree: HierarchyTree) -> Frame {
        let focused = self
            .focus
            .and_then(|channel| tree.find_channel(channel).map(|id| (channel, id)));

        let trend = match focused {
            Some((channel, node)) => TrendLine {
                color: tree.get(node).and_then(|n| n.color),
                ..self.cartesian.line(&self.store.current_history(channel))
            },
            None => self.cartesian.initial_line(),
        };
        let focus = focused.and_then(|(channel, node)| {
            Some(FocusView {
                channel: channel.display_path(),
                node,
                breadcrumb: breadcrumb_trail(&tree, node, &self.config.breadcrumb),
                hover: tree.hover(node)?,
            })
        });

        Frame {
            session_id: self.id,
            turn: self.store.ingested(),
            refreshed_at: Utc::now(),
            trend,
            focus,
            scatter: self.scatter.project(&self.store),
            tree,
        }
    }
}

/// Session handle for multi-threaded hosts. Each refresh holds the one lock
/// from ingest to projection, so refreshes never interleave.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<AffectSession>>,
}

impl SharedSession {
    pub fn new(session: AffectSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn refresh(&self, snapshot: &AffectSnapshot) -> Result<Frame, SessionError> {
        self.with(|session| session.refresh(snapshot))
    }

    pub fn refresh_json(&self, payload: &str) -> Result<Frame, SessionError> {
        self.with(|session| session.refresh_json(payload))
    }

    pub fn set_focus(&self, channel: Option<Channel>) -> Result<(), SessionError> {
        self.with(|session| {
            session.set_focus(channel);
            Ok(())
        })
    }

    /// Run `f` while holding the session lock.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut AffectSession) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut guard = self.inner.lock().map_err(|_| SessionError::Poisoned)?;
        f(&mut guard)
    }
}
