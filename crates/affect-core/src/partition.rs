use crate::channel::{Channel, TOP_LEVEL};
use crate::color::{derive_color, PaletteCursor, Rgb};
use crate::error::AffectError;
use crate::layout::NodeSpec;
use serde::Serialize;
use std::f64::consts::{PI, TAU};
use tracing::debug;

/// Index of a node inside one [`HierarchyTree`]. Only meaningful for the
/// tree that produced it.
pub type NodeId = usize;

pub const ROOT: NodeId = 0;

/// Key given to the hidden scalar child under every metric.
pub const SCORE_KEY: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Implicit, unlabeled, never drawn.
    Root,
    /// Container for other groups or metrics.
    Group,
    /// Holds a channel's window history; drawn as a ring segment.
    Metric,
    /// Latest value of its parent metric; sized but never drawn.
    Score,
}

/// Radial geometry of the sunburst. Radii depend on depth only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingGeometry {
    /// Partition radius.
    pub radius: f64,
}

impl RingGeometry {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// `1.1 * min(width, height) / π`.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self::new(1.1 * width.min(height) / PI)
    }

    /// Width of one ring step.
    pub fn unit(&self) -> f64 {
        self.radius / PI
    }

    pub fn inner_radius(&self, depth: usize) -> f64 {
        self.unit() * depth as f64
    }

    pub fn outer_radius(&self, depth: usize) -> f64 {
        self.unit() * (depth as f64 + 2.0) - 1.0
    }
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self::for_canvas(800.0, 600.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    pub id: NodeId,
    pub key: String,
    pub kind: NodeKind,
    pub depth: usize,
    /// Absolute aggregate used for sizing and shading: `|latest|` for a
    /// metric, the sum over children for a group.
    pub value: f64,
    /// Window history for metrics; empty otherwise.
    pub scores: Vec<f64>,
    /// The key, or the latest hoisted label for Emotion and Mood.
    pub description: String,
    /// Full hoisted label history. Kept for inspection, not drawn.
    pub descriptions: Vec<String>,
    pub angle_start: f64,
    pub angle_span: f64,
    /// Drawn end angle, see [`HierarchyNode::draw_end_angle`].
    pub arc_end: f64,
    /// Label rotation in degrees, see
    /// [`HierarchyNode::label_rotation_degrees`].
    pub label_rotation: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// `None` only for the root.
    pub color: Option<Rgb>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl HierarchyNode {
    fn new(id: NodeId, key: &str, kind: NodeKind, depth: usize, parent: Option<NodeId>) -> Self {
        Self {
            id,
            key: key.to_string(),
            kind,
            depth,
            value: 0.0,
            scores: Vec::new(),
            description: key.to_string(),
            descriptions: Vec::new(),
            angle_start: 0.0,
            angle_span: 0.0,
            arc_end: 0.0,
            label_rotation: 0.0,
            inner_radius: 0.0,
            outer_radius: 0.0,
            color: None,
            parent,
            children: Vec::new(),
        }
    }

    /// Only nodes with children and a non-zero span get an arc.
    pub fn is_drawable(&self) -> bool {
        self.kind != NodeKind::Root && !self.children.is_empty() && self.angle_span > 0.0
    }

    /// End angle with the small per-ring gap between neighbouring arcs.
    pub fn draw_end_angle(&self) -> f64 {
        self.angle_start + self.angle_span - 0.01 / (self.depth as f64 + 0.5)
    }

    /// Rotation, in degrees, for a label placed along the arc's mid-angle.
    pub fn label_rotation_degrees(&self) -> f64 {
        180.0 * ((self.angle_start + self.angle_span / 2.0 - PI / 2.0) / PI)
    }

    /// Newest entry of the node's history.
    pub fn latest_score(&self) -> Result<f64, AffectError> {
        self.scores
            .last()
            .copied()
            .ok_or_else(|| AffectError::EmptyHistory {
                channel: self.key.clone(),
            })
    }
}

/// Text shown in the middle of the sunburst while a node is hovered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverSummary {
    pub description: String,
    pub score: Option<f64>,
    /// Score with two significant digits.
    pub score_label: Option<String>,
}

/// Arena of nodes for one partition pass. Parents precede their children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyTree {
    nodes: Vec<HierarchyNode>,
}

impl HierarchyTree {
    pub fn root(&self) -> &HierarchyNode {
        &self.nodes[ROOT]
    }

    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &HierarchyNode> + '_ {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&child| &self.nodes[child])
    }

    pub fn parent(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id)?.parent.map(|p| &self.nodes[p])
    }

    /// Walk keys down from the root, e.g. `["Personality", "Big Five"]`.
    pub fn find(&self, path: &[&str]) -> Option<NodeId> {
        let mut current = ROOT;
        for key in path {
            current = self.children(current).find(|c| c.key == *key)?.id;
        }
        Some(current)
    }

    pub fn find_channel(&self, channel: Channel) -> Option<NodeId> {
        self.find(channel.path())
    }

    /// Keys from the first ring down to `id`.
    pub fn key_path(&self, id: NodeId) -> Vec<&str> {
        self.ancestor_ids(id)
            .into_iter()
            .map(|i| self.nodes[i].key.as_str())
            .collect()
    }

    /// Ids from the most distant ancestor below the root down to `id`
    /// itself. Empty for the root or an unknown id.
    pub fn ancestor_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = self.nodes.get(id);
        while let Some(node) = cursor {
            if node.parent.is_none() {
                break;
            }
            path.push(node.id);
            cursor = node.parent.map(|p| &self.nodes[p]);
        }
        path.reverse();
        path
    }

    pub fn hover(&self, id: NodeId) -> Option<HoverSummary> {
        let node = self.nodes.get(id)?;
        let score = node.latest_score().ok();
        Some(HoverSummary {
            description: node.description.clone(),
            score,
            score_label: score.map(two_significant_digits),
        })
    }
}

/// Builds a [`HierarchyTree`] from a node layout, assigning angular extent,
/// radii and colors.
#[derive(Debug, Clone, Default)]
pub struct HierarchyPartitioner {
    geometry: RingGeometry,
}

impl HierarchyPartitioner {
    pub fn new(geometry: RingGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    /// Partition `layout` into a fresh tree.
    ///
    /// Shape errors are reported before the palette cursor is advanced, so a
    /// rejected layout consumes no colors.
    pub fn partition(
        &self,
        layout: &[(String, NodeSpec)],
        cursor: &mut PaletteCursor,
    ) -> Result<HierarchyTree, AffectError> {
        check_top_level(layout)?;

        let mut tree = HierarchyTree {
            nodes: vec![HierarchyNode::new(ROOT, "", NodeKind::Root, 0, None)],
        };
        let mut total = 0.0;
        for (key, spec) in layout {
            let child = insert(&mut tree, ROOT, key, spec, 1)?;
            total += tree.nodes[child].value;
        }
        tree.nodes[ROOT].value = total;

        self.assign_extent(&mut tree);
        assign_colors(&mut tree, cursor);

        debug!(
            nodes = tree.len(),
            total_value = total,
            palette_issued = cursor.issued(),
            "affect hierarchy partitioned"
        );
        Ok(tree)
    }

    fn assign_extent(&self, tree: &mut HierarchyTree) {
        let root = &mut tree.nodes[ROOT];
        root.angle_start = 0.0;
        root.angle_span = if root.value > 0.0 { TAU } else { 0.0 };

        // Parents precede children, so one forward sweep suffices.
        for id in 0..tree.nodes.len() {
            let (start, span, value, depth) = {
                let n = &tree.nodes[id];
                (n.angle_start, n.angle_span, n.value, n.depth)
            };
            let node = &mut tree.nodes[id];
            node.inner_radius = self.geometry.inner_radius(depth);
            node.outer_radius = self.geometry.outer_radius(depth);
            node.arc_end = node.draw_end_angle();
            node.label_rotation = node.label_rotation_degrees();

            let scale = if value > 0.0 { span / value } else { 0.0 };
            let mut x = start;
            for i in 0..tree.nodes[id].children.len() {
                let child = tree.nodes[id].children[i];
                let child_span = tree.nodes[child].value * scale;
                tree.nodes[child].angle_start = x;
                tree.nodes[child].angle_span = child_span;
                x += child_span;
            }
        }
    }
}

fn check_top_level(layout: &[(String, NodeSpec)]) -> Result<(), AffectError> {
    let keys: Vec<&str> = layout.iter().map(|(k, _)| k.as_str()).collect();
    if keys != TOP_LEVEL {
        return Err(AffectError::schema(format!(
            "expected top-level groups {TOP_LEVEL:?}, found {keys:?}"
        )));
    }
    Ok(())
}

fn push_node(
    tree: &mut HierarchyTree,
    parent: NodeId,
    key: &str,
    kind: NodeKind,
    depth: usize,
) -> NodeId {
    let id = tree.nodes.len();
    tree.nodes.push(HierarchyNode::new(id, key, kind, depth, Some(parent)));
    tree.nodes[parent].children.push(id);
    id
}

fn insert(
    tree: &mut HierarchyTree,
    parent: NodeId,
    key: &str,
    spec: &NodeSpec,
    depth: usize,
) -> Result<NodeId, AffectError> {
    match spec {
        NodeSpec::DescriptionField(_) => Err(AffectError::schema(format!(
            "description field {key} has no enclosing group"
        ))),
        NodeSpec::Leaf(history) => {
            if let Some(bad) = history.iter().find(|v| !v.is_finite()) {
                return Err(AffectError::schema(format!("{key} holds non-finite value {bad}")));
            }
            let id = push_node(tree, parent, key, NodeKind::Metric, depth);
            tree.nodes[id].scores = history.clone();

            // An empty history still gets its scalar child, sized at zero.
            let latest = history.last().copied().unwrap_or(0.0).abs();
            let score = push_node(tree, id, SCORE_KEY, NodeKind::Score, depth + 1);
            tree.nodes[score].value = latest;
            tree.nodes[id].value = latest;
            Ok(id)
        }
        NodeSpec::Group(children) => {
            let id = push_node(tree, parent, key, NodeKind::Group, depth);
            let mut total = 0.0;
            for (child_key, child_spec) in children {
                if let NodeSpec::DescriptionField(labels) = child_spec {
                    let node = &mut tree.nodes[id];
                    node.descriptions = labels.clone();
                    if let Some(latest) = labels.last() {
                        node.description = latest.clone();
                    }
                    continue;
                }
                let child = insert(tree, id, child_key, child_spec, depth + 1)?;
                total += tree.nodes[child].value;
            }
            if tree.nodes[id].children.is_empty() {
                return Err(AffectError::schema(format!("group {key} has no metrics")));
            }
            tree.nodes[id].value = total;
            Ok(id)
        }
    }
}

fn assign_colors(tree: &mut HierarchyTree, cursor: &mut PaletteCursor) {
    for id in 1..tree.nodes.len() {
        let node = &tree.nodes[id];
        let color = if node.depth == 1 {
            Some(cursor.next_color())
        } else {
            node.parent
                .and_then(|p| tree.nodes[p].color)
                .map(|parent_color| derive_color(parent_color, node.value, node.depth))
        };
        tree.nodes[id].color = color;
    }
}

/// Format with two significant digits, switching to exponent notation for
/// very large or very small magnitudes. Halfway cases round away from zero.
pub fn two_significant_digits(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0.0".to_string();
    }

    // Exact decimal digits; only the third one decides the rounding.
    let expanded = format!("{:.40e}", value.abs());
    let (mantissa, exponent) = expanded.split_once('e').unwrap_or((expanded.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: Vec<u32> = mantissa.chars().filter_map(|c| c.to_digit(10)).collect();
    let digit = |i: usize| digits.get(i).copied().unwrap_or(0);
    let mut lead = digit(0) * 10 + digit(1);
    if digit(2) >= 5 {
        lead += 1;
    }
    if lead == 100 {
        lead = 10;
        exponent += 1;
    }

    let (high, low) = (lead / 10, lead % 10);
    let sign = if value < 0.0 { "-" } else { "" };
    match exponent {
        1 => format!("{sign}{lead}"),
        0 => format!("{sign}{high}.{low}"),
        -6..=-1 => {
            let zeros = "0".repeat((-exponent - 1) as usize);
            format!("{sign}0.{zeros}{lead}")
        }
        _ => {
            let exp_sign = if exponent < 0 { '-' } else { '+' };
            format!("{sign}{high}.{low}e{exp_sign}{}", exponent.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn significant_digit_formatting() {
        assert_eq!(two_significant_digits(0.0), "0.0");
        assert_eq!(two_significant_digits(0.5), "0.50");
        assert_eq!(two_significant_digits(-0.123), "-0.12");
        assert_eq!(two_significant_digits(1.46), "1.5");
        assert_eq!(two_significant_digits(12.0), "12");
        assert_eq!(two_significant_digits(150.0), "1.5e+2");
        assert_eq!(two_significant_digits(99.6), "1.0e+2");
        assert_eq!(two_significant_digits(0.0000001), "1.0e-7");
        assert_eq!(two_significant_digits(0.0000012), "0.0000012");
        assert_eq!(two_significant_digits(9.96), "10");
    }

    #[test]
    fn exact_halves_round_away_from_zero() {
        assert_eq!(two_significant_digits(0.125), "0.13");
        assert_eq!(two_significant_digits(-0.125), "-0.13");
        assert_eq!(two_significant_digits(2.5), "2.5");
        assert_eq!(two_significant_digits(0.375), "0.38");
        // 0.145 is stored just below the half
        assert_eq!(two_significant_digits(0.145), "0.14");
    }

    #[test]
    fn arc_end_and_label_rotation() {
        let mut node = HierarchyNode::new(1, "Emotion", NodeKind::Group, 1, Some(ROOT));
        node.angle_span = PI;
        assert!((node.draw_end_angle() - (PI - 0.01 / 1.5)).abs() < 1e-12);
        assert!(node.label_rotation_degrees().abs() < 1e-12);

        node.angle_start = PI;
        node.angle_span = PI / 2.0;
        node.depth = 2;
        assert!((node.draw_end_angle() - (1.5 * PI - 0.01 / 2.5)).abs() < 1e-12);
        assert!((node.label_rotation_degrees() - 135.0).abs() < 1e-9);
    }

    #[test]
    fn ring_radii_grow_with_depth() {
        let g = RingGeometry::new(PI * 10.0);
        assert_eq!(g.unit(), 10.0);
        assert_eq!(g.inner_radius(1), 10.0);
        assert_eq!(g.outer_radius(1), 29.0);
        assert_eq!(g.inner_radius(3), 30.0);
    }

    #[test]
    fn description_at_top_level_is_rejected() {
        let layout = vec![
            ("Emotion".to_string(), NodeSpec::DescriptionField(vec![])),
            ("Mood".to_string(), NodeSpec::Leaf(vec![])),
            ("Personality".to_string(), NodeSpec::Leaf(vec![])),
            ("Satisfaction".to_string(), NodeSpec::Leaf(vec![])),
        ];
        let mut cursor = PaletteCursor::new();
        let err = HierarchyPartitioner::default()
            .partition(&layout, &mut cursor)
            .unwrap_err();
        assert!(err.is_schema());
        assert_eq!(cursor.issued(), 0);
    }
}
