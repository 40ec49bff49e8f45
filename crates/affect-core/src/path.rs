use crate::color::{Rgb, TextTone};
use crate::partition::{HierarchyNode, HierarchyTree, NodeId};
use serde::{Deserialize, Serialize};

/// Ancestor chain for `id`, most distant ancestor first and the queried
/// node last. The implicit root is excluded, so a node at depth `d`
/// yields `d` entries.
pub fn resolve_ancestor_path(tree: &HierarchyTree, id: NodeId) -> Vec<&HierarchyNode> {
    tree.ancestor_ids(id)
        .into_iter()
        .filter_map(|i| tree.get(i))
        .collect()
}

/// Size of one breadcrumb polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbShape {
    pub width: f64,
    pub height: f64,
    pub spacing: f64,
    /// Depth of the arrow tip and of the tail notch.
    pub tip: f64,
}

impl Default for BreadcrumbShape {
    fn default() -> Self {
        Self {
            width: 116.0,
            height: 30.0,
            spacing: 3.0,
            tip: 7.0,
        }
    }
}

impl BreadcrumbShape {
    /// Arrow-shaped outline. Every crumb after the first gets a tail notch.
    pub fn polygon(&self, index: usize) -> Vec<(f64, f64)> {
        let (w, h, t) = (self.width, self.height, self.tip);
        let mut points = vec![(0.0, 0.0), (w, 0.0), (w + t, h / 2.0), (w, h), (0.0, h)];
        if index > 0 {
            points.push((t, h / 2.0));
        }
        points
    }

    pub fn offset(&self, index: usize) -> f64 {
        index as f64 * (self.width + self.spacing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crumb {
    pub node: NodeId,
    pub key: String,
    pub depth: usize,
    pub fill: Option<Rgb>,
    pub text: TextTone,
    pub offset_x: f64,
    pub polygon: Vec<(f64, f64)>,
}

/// Lay out the breadcrumb trail for the ancestor path of `id`.
pub fn breadcrumb_trail(tree: &HierarchyTree, id: NodeId, shape: &BreadcrumbShape) -> Vec<Crumb> {
    resolve_ancestor_path(tree, id)
        .into_iter()
        .enumerate()
        .map(|(i, node)| Crumb {
            node: node.id,
            key: node.key.clone(),
            depth: node.depth,
            fill: node.color,
            text: node.color.map(Rgb::text_tone).unwrap_or(TextTone::Dark),
            offset_x: shape.offset(i),
            polygon: shape.polygon(i),
        })
        .collect()
}
