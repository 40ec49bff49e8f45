pub mod adapter;
pub mod channel;
pub mod color;
pub mod error;
pub mod layout;
pub mod partition;
pub mod path;
pub mod projector;
pub mod snapshot;
pub mod store;
pub mod window;


pub use adapter::{snapshot_from_json, snapshot_from_value, UserRecord};
pub use channel::{Channel, DescriptionChannel};
pub use color::{derive_color, PaletteCursor, Rgb, TextTone, BRIGHTNESS_DELTAS, PALETTE};
pub use error::AffectError;
pub use layout::{affect_layout, NodeSpec};
pub use partition::{
    HierarchyNode, HierarchyPartitioner, HierarchyTree, HoverSummary, NodeId, NodeKind,
    RingGeometry,
};
pub use path::{breadcrumb_trail, resolve_ancestor_path, BreadcrumbShape, Crumb};
pub use projector::{CartesianProjector, ScatterPoint, ScatterProjector, TrendLine, TrendPoint};
pub use snapshot::{AffectReading, AffectSnapshot, BigFive, Pad, Personality};
pub use store::SlidingWindowStore;
pub use window::{SlidingWindow, WINDOW_SIZE};
